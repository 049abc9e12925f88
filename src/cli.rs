use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct CliConfig {
    pub config_path: PathBuf,
    pub seed: Option<String>,
    pub position: Option<Vec2>,
    pub preview_path: Option<PathBuf>,
    pub fog_of_war: bool,
    pub save_path: Option<PathBuf>,
    pub load_path: Option<PathBuf>,
    pub battle: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("realm.json"),
            seed: None,
            position: None,
            preview_path: None,
            fog_of_war: false,
            save_path: None,
            load_path: None,
            battle: false,
        }
    }
}

impl CliConfig {
    pub fn from_env_args() -> Result<Self> {
        Self::from_iter(
            std::env::args_os().skip(1),
            std::env::var_os("REALM_GEN_SEED"),
            std::env::var_os("REALM_GEN_FOG"),
        )
    }

    fn from_iter<I>(args: I, env_seed: Option<OsString>, env_fog: Option<OsString>) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self {
            seed: env_seed.map(|s| s.to_string_lossy().to_string()),
            fog_of_war: env_is_truthy(env_fog.as_deref()),
            ..Self::default()
        };

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            let arg_str = arg.to_string_lossy();
            match arg_str.as_ref() {
                "--config" => config.config_path = PathBuf::from(required(&mut iter, "--config")?),
                "--seed" => {
                    config.seed = Some(required(&mut iter, "--seed")?.to_string_lossy().to_string())
                }
                "--at" => {
                    let value = required(&mut iter, "--at")?;
                    config.position = Some(parse_position(&value.to_string_lossy())?);
                }
                "--preview" => {
                    config.preview_path = Some(PathBuf::from(required(&mut iter, "--preview")?))
                }
                "--fog" => config.fog_of_war = true,
                "--save" => config.save_path = Some(PathBuf::from(required(&mut iter, "--save")?)),
                "--load" => config.load_path = Some(PathBuf::from(required(&mut iter, "--load")?)),
                "--battle" => config.battle = true,
                other => log::warn!("ignoring unknown argument {other:?}"),
            }
        }

        Ok(config)
    }
}

fn required<I>(iter: &mut I, flag: &str) -> Result<OsString>
where
    I: Iterator<Item = OsString>,
{
    iter.next().ok_or_else(|| anyhow!("{flag} requires a value"))
}

fn parse_position(value: &str) -> Result<Vec2> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| anyhow!("expected X,Y but got {value:?}"))?;
    let x: f32 = x.trim().parse().with_context(|| format!("invalid x in {value:?}"))?;
    let y: f32 = y.trim().parse().with_context(|| format!("invalid y in {value:?}"))?;
    Ok(Vec2::new(x, y))
}

fn env_is_truthy(value: Option<&OsStr>) -> bool {
    value
        .map(|v| {
            let lowered = v.to_string_lossy().trim().to_ascii_lowercase();
            matches!(lowered.as_str(), "1" | "true" | "yes" | "on")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::CliConfig;
    use glam::Vec2;
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn defaults_without_arguments() {
        let parsed = CliConfig::from_iter(Vec::<OsString>::new(), None, None).unwrap();
        assert_eq!(parsed, CliConfig::default());
        assert_eq!(parsed.config_path, PathBuf::from("realm.json"));
    }

    #[test]
    fn flags_are_parsed() {
        let parsed = CliConfig::from_iter(
            args(&[
                "--seed", "ember", "--at", "12.5, -4", "--preview", "out/map.png", "--fog",
                "--battle",
            ]),
            None,
            None,
        )
        .unwrap();
        assert_eq!(parsed.seed.as_deref(), Some("ember"));
        assert_eq!(parsed.position, Some(Vec2::new(12.5, -4.0)));
        assert_eq!(parsed.preview_path, Some(PathBuf::from("out/map.png")));
        assert!(parsed.fog_of_war);
        assert!(parsed.battle);
    }

    #[test]
    fn cli_seed_overrides_env() {
        let parsed = CliConfig::from_iter(
            args(&["--seed", "cli"]),
            Some(OsString::from("env")),
            None,
        )
        .unwrap();
        assert_eq!(parsed.seed.as_deref(), Some("cli"));
    }

    #[test]
    fn env_enables_fog() {
        let parsed =
            CliConfig::from_iter(Vec::<OsString>::new(), None, Some(OsString::from("yes")))
                .unwrap();
        assert!(parsed.fog_of_war);
    }

    #[test]
    fn missing_value_is_an_error() {
        assert!(CliConfig::from_iter(args(&["--save"]), None, None).is_err());
        assert!(CliConfig::from_iter(args(&["--at", "nope"]), None, None).is_err());
    }
}
