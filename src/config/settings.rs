use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use image::Rgb;

use super::{ContentApiConfig, LoadedConfig, ThumbnailerConfig};
use crate::cli::CliArgs;
use crate::storage::Credentials;
use crate::thumbnail::{JpegQuality, ThumbnailMode, ThumbnailPolicy};

/// Object store host (`host:port`)
pub const ENV_STORE_HOST: &str = "MINIO_HOST";
pub const ENV_STORE_ACCESS_KEY: &str = "MINIO_ACCESS_KEY_ID";
pub const ENV_STORE_SECRET_KEY: &str = "MINIO_SECRET_ACCESS_KEY";

/// Where thumbnails are uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSettings {
    /// Directory standing in for the object store
    Local { root: PathBuf, bucket: String },
    /// S3-compatible endpoint
    S3 {
        endpoint: String,
        bucket: String,
        region: String,
        credentials: Option<Credentials>,
    },
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub journal: String,
    pub policy: ThumbnailPolicy,
    pub quality: JpegQuality,
    pub locale: String,
    pub listing_url: String,
    pub doi_prefix: String,
    pub content_api: ContentApiConfig,
    pub store: StoreSettings,
    pub workspace: PathBuf,
    pub lock_file: PathBuf,
    pub verbose: bool,
}

impl Settings {
    /// Merge CLI arguments, environment and the optional config file.
    /// CLI arguments take precedence over the environment, which takes
    /// precedence over the config file.
    pub fn resolve(
        args: &CliArgs,
        loaded: Option<&LoadedConfig>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let defaults = ThumbnailerConfig::default();
        let config = loaded.map(|lc| &lc.config).unwrap_or(&defaults);
        let resolve_path = |path: &str| match loaded {
            Some(lc) => lc.resolve_path(path),
            None => PathBuf::from(path),
        };

        validate_journal(&args.journal_shortname)?;

        let mode: ThumbnailMode = args.mode.parse()?;
        let [r, g, b] = config.thumbnail.fill_color;
        let policy = ThumbnailPolicy::new(mode, args.size.unwrap_or(config.thumbnail.size))
            .with_fill_color(Rgb([r, g, b]));
        policy.validate()?;

        let quality = JpegQuality::new(args.quality.unwrap_or(config.thumbnail.quality))?;

        let workspace = match (&args.workspace, &config.workspace_dir) {
            (Some(dir), _) => dir.clone(),
            (None, Some(dir)) => resolve_path(dir),
            (None, None) => default_workspace(&env)?,
        };

        let store_config = &config.object_store;
        let local_root = args
            .local_store
            .clone()
            .or_else(|| store_config.local_root.as_deref().map(resolve_path));

        let store = match local_root {
            Some(root) => StoreSettings::Local {
                root,
                bucket: store_config.bucket.clone(),
            },
            None => {
                let host = env(ENV_STORE_HOST)
                    .or_else(|| store_config.endpoint.clone())
                    .with_context(|| {
                        format!(
                            "object store endpoint is not configured; set {} or use --local-store",
                            ENV_STORE_HOST
                        )
                    })?;
                let access_key = env(ENV_STORE_ACCESS_KEY).or_else(|| store_config.access_key_id.clone());
                let secret_key =
                    env(ENV_STORE_SECRET_KEY).or_else(|| store_config.secret_access_key.clone());

                StoreSettings::S3 {
                    endpoint: endpoint_url(&host, store_config.secure),
                    bucket: store_config.bucket.clone(),
                    region: store_config.region.clone(),
                    credentials: credentials(access_key, secret_key)?,
                }
            }
        };

        Ok(Self {
            journal: args.journal_shortname.clone(),
            policy,
            quality,
            locale: config.locale.clone(),
            listing_url: config.listing_url.clone(),
            doi_prefix: config.doi_prefix.clone(),
            content_api: config.content_api.clone(),
            store,
            workspace,
            lock_file: resolve_path(&config.lock_file),
            verbose: args.verbose,
        })
    }
}

/// Journal names end up in URLs and object keys.
fn validate_journal(journal: &str) -> Result<()> {
    let valid = !journal.is_empty()
        && journal
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        bail!(
            "invalid journal short name '{}': use letters, digits, '-' or '_'",
            journal
        );
    }
    Ok(())
}

fn default_workspace(env: &impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
    let home = env("HOME").context("HOME is not set; pass --workspace")?;
    Ok(PathBuf::from(home).join("Desktop").join("THUMBNAIL_OUT"))
}

/// Turn a bare `host:port` into a URL; full URLs pass through.
fn endpoint_url(host: &str, secure: bool) -> String {
    if host.contains("://") {
        host.to_string()
    } else if secure {
        format!("https://{}", host)
    } else {
        format!("http://{}", host)
    }
}

fn credentials(access_key: Option<String>, secret_key: Option<String>) -> Result<Option<Credentials>> {
    match (access_key, secret_key) {
        (Some(access_key_id), Some(secret_access_key)) => Ok(Some(Credentials {
            access_key_id,
            secret_access_key,
        })),
        (None, None) => Ok(None),
        _ => bail!(
            "object store credentials are incomplete: set both {} and {}",
            ENV_STORE_ACCESS_KEY,
            ENV_STORE_SECRET_KEY
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThumbnailerError;
    use clap::Parser;
    use std::collections::HashMap;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["thumbnailer", "nature", "pad"];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).unwrap()
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_environment() {
        let settings = Settings::resolve(
            &args(&[]),
            None,
            env(&[
                ("HOME", "/home/editor"),
                (ENV_STORE_HOST, "minio.local:9000"),
                (ENV_STORE_ACCESS_KEY, "ak"),
                (ENV_STORE_SECRET_KEY, "sk"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.policy, ThumbnailPolicy::pad(200));
        assert_eq!(settings.quality.value(), 70);
        assert_eq!(settings.workspace, PathBuf::from("/home/editor/Desktop/THUMBNAIL_OUT"));
        assert_eq!(settings.lock_file, PathBuf::from("/tmp/thumbnail_maker.lock"));
        assert_eq!(
            settings.store,
            StoreSettings::S3 {
                endpoint: "http://minio.local:9000".to_string(),
                bucket: "natureasia-static".to_string(),
                region: "us-east-1".to_string(),
                credentials: Some(Credentials {
                    access_key_id: "ak".to_string(),
                    secret_access_key: "sk".to_string(),
                }),
            }
        );
    }

    #[test]
    fn test_invalid_mode_is_fatal_policy_error() {
        let args = CliArgs::try_parse_from(["thumbnailer", "nature", "stretch"]).unwrap();

        let err = Settings::resolve(&args, None, env(&[("HOME", "/h")])).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ThumbnailerError>(),
            Some(ThumbnailerError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_invalid_quality_is_fatal() {
        let err = Settings::resolve(&args(&["-q", "120", "--local-store", "/s"]), None, env(&[("HOME", "/h")]))
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ThumbnailerError>(),
            Some(ThumbnailerError::InvalidQuality(120))
        ));
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = ThumbnailerConfig::default();
        config.thumbnail.size = 300;
        config.thumbnail.quality = 50;
        config.thumbnail.fill_color = [0, 0, 0];
        config.workspace_dir = Some("work".to_string());
        config.object_store.local_root = Some("store".to_string());
        let loaded = LoadedConfig {
            config,
            config_dir: PathBuf::from("/etc/thumbnailer"),
        };

        let settings =
            Settings::resolve(&args(&["--size", "64"]), Some(&loaded), env(&[])).unwrap();

        assert_eq!(settings.policy.target_edge, 64);
        assert_eq!(settings.policy.fill_color, Rgb([0, 0, 0]));
        assert_eq!(settings.quality.value(), 50);
        assert_eq!(settings.workspace, PathBuf::from("/etc/thumbnailer/work"));
        assert_eq!(
            settings.store,
            StoreSettings::Local {
                root: PathBuf::from("/etc/thumbnailer/store"),
                bucket: "natureasia-static".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_endpoint_is_error() {
        let err = Settings::resolve(&args(&[]), None, env(&[("HOME", "/h")])).unwrap_err();

        assert!(err.to_string().contains(ENV_STORE_HOST));
    }

    #[test]
    fn test_incomplete_credentials_are_rejected() {
        let result = Settings::resolve(
            &args(&[]),
            None,
            env(&[("HOME", "/h"), (ENV_STORE_HOST, "m:9000"), (ENV_STORE_ACCESS_KEY, "ak")]),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_journal_name_is_validated() {
        let bad = CliArgs::try_parse_from(["thumbnailer", "../etc", "pad"]).unwrap();

        assert!(Settings::resolve(&bad, None, env(&[("HOME", "/h")])).is_err());
    }

    #[test]
    fn test_endpoint_url() {
        assert_eq!(endpoint_url("minio:9000", false), "http://minio:9000");
        assert_eq!(endpoint_url("minio:9000", true), "https://minio:9000");
        assert_eq!(endpoint_url("https://s3.example.com", false), "https://s3.example.com");
    }
}
