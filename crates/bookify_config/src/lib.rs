use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::PathBuf;
pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Layering order: `config/default.*`, `config/{RUN_ENV}.*`, then environment
/// variables with the `BOOKIFY` prefix (`__` as separator, e.g.
/// `BOOKIFY_SERVER__PORT=8086`). Finally, `"secret_from_env"` markers in the
/// deserialized config are replaced with values from the environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "BOOKIFY".to_string());

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));
    let workspace_root = manifest_dir
        .ancestors()
        .nth(2) // go from crates/bookify_config to workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    let default_path = workspace_root.join("config/default");
    let env_path = workspace_root.join(format!("config/{}", run_env));

    let builder = Config::builder()
        .add_source(File::with_name(default_path.to_string_lossy().as_ref()).required(false))
        .add_source(File::with_name(env_path.to_string_lossy().as_ref()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(apply_env_overrides_from_marker(raw_config))
}

/// Recursively replaces all "secret_from_env" string values with environment variable values
fn inject_env_secrets(value: &mut Value) {
    fn walk(path: Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v);
                }
            }
            Value::String(s) if s == "secret_from_env" => {
                let env_key = path.join("_").to_uppercase();
                if let Ok(env_val) = std::env::var(&env_key) {
                    *obj = Value::String(env_val);
                } else {
                    tracing::warn!("env var {} not found for secret_from_env", env_key);
                }
            }
            _ => {}
        }
    }

    walk(vec![], value);
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> AppConfig {
    match serde_json::to_value(&config) {
        Ok(mut json) => {
            inject_env_secrets(&mut json);
            serde_json::from_value(json).unwrap_or(config)
        }
        Err(_) => config,
    }
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The path can be overridden via `DOTENV_OVERRIDE` or a leading `.env*`
/// command line argument; otherwise `.env` in the working directory is used.
/// Loading happens at most once per process.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = std::env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config(password: &str, api_key: &str) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 8086,
            },
            use_email: true,
            use_sms: true,
            smtp: Some(SmtpConfig {
                host: "smtp.example.com".into(),
                port: 587,
                username: "mailer".into(),
                password: password.into(),
                from_address: "no-reply@example.com".into(),
                from_name: Some("Bookify".into()),
            }),
            sms: Some(SmsConfig {
                api_url: "https://sms.example.com/send".into(),
                api_key: api_key.into(),
            }),
        }
    }

    #[test]
    fn marker_is_replaced_from_environment() {
        std::env::set_var("SMTP_PASSWORD", "hunter2");
        let config = apply_env_overrides_from_marker(sample_config("secret_from_env", "abc123"));
        assert_eq!(config.smtp.as_ref().unwrap().password, "hunter2");
        // non-marker values are left alone
        assert_eq!(config.sms.as_ref().unwrap().api_key, "abc123");
        std::env::remove_var("SMTP_PASSWORD");
    }

    #[test]
    fn missing_env_var_leaves_marker_in_place() {
        std::env::remove_var("SMS_API_KEY");
        let config = apply_env_overrides_from_marker(sample_config("pw", "secret_from_env"));
        assert_eq!(config.sms.as_ref().unwrap().api_key, "secret_from_env");
    }
}
