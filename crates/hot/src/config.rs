use anyhow::Context as _;
use camino::Utf8Path;
use hot_assists::AssistConfig;

/// Reads assist settings from a TOML file, or the defaults without one.
pub(crate) fn load(path: Option<&Utf8Path>) -> anyhow::Result<AssistConfig> {
    let Some(path) = path else {
        return Ok(AssistConfig::default());
    };

    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
    parse(&text).with_context(|| format!("invalid configuration in `{path}`"))
}

fn parse(text: &str) -> Result<AssistConfig, toml::de::Error> {
    toml::from_str(text)
}
