use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/clicks.json";
const DEFAULT_TABLE: &str = "clicks";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    pub url: String,
    pub api_key: String,
    pub table: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub port: u16,
    pub data_path: PathBuf,
    /// `None` when `SUPABASE_URL` or `SUPABASE_KEY` is unset or empty.
    pub remote: Option<RemoteSettings>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = var("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = var("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let remote = match (var("SUPABASE_URL"), var("SUPABASE_KEY")) {
            (Some(url), Some(api_key)) => Some(RemoteSettings {
                url,
                api_key,
                table: var("CLICKS_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            }),
            _ => None,
        };

        Self {
            port,
            data_path,
            remote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let settings = settings(&[]);
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.data_path, PathBuf::from("data/clicks.json"));
        assert_eq!(settings.remote, None);
    }

    #[test]
    fn remote_requires_url_and_key() {
        assert_eq!(settings(&[("SUPABASE_URL", "https://x.supabase.co")]).remote, None);
        assert_eq!(
            settings(&[("SUPABASE_URL", "https://x.supabase.co"), ("SUPABASE_KEY", " ")]).remote,
            None
        );

        let remote = settings(&[
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_KEY", "anon"),
            ("PORT", "9000"),
        ]);
        assert_eq!(remote.port, 9000);
        assert_eq!(
            remote.remote,
            Some(RemoteSettings {
                url: "https://x.supabase.co".into(),
                api_key: "anon".into(),
                table: "clicks".into(),
            })
        );
    }

    #[test]
    fn invalid_port_falls_back_to_default() {
        assert_eq!(settings(&[("PORT", "eighty")]).port, 8080);
    }
}
