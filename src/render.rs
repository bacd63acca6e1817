//! Command-line rendering of configurations
//!
//! A configuration renders two ways: as `--key value` flags, and as a compact
//! `key=value,,key=value` signature that tags the run (for example in an
//! output-file prefix). Tuples are space-joined in flags and comma-joined in
//! signatures; `true` booleans render with an empty value.

use serde::{Deserialize, Serialize};

use crate::sample::Configuration;
use crate::space::{ParamValue, ResolvedValue};

/// Command prefix used when none is configured
pub const DEFAULT_PREFIX: &str = "python cnn4nlp.py --corpus_path=data/twitter.pkl --model_path=models/twitter.pkl --l2  --norm_w --ebd_delay_epoch=0 --au=tanh --n_epochs=10";

/// Flag that carries the run tag when none is configured
pub const DEFAULT_TAG_FLAG: &str = "img_prefix";

/// Separators used to render a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    /// Between `key value` pairs
    pub pair_sep: &'static str,
    /// Between a key and its value
    pub key_val_sep: &'static str,
    /// Between tuple elements
    pub tuple_sep: &'static str,
    /// Before each key
    pub key_prefix: &'static str,
}

impl RenderStyle {
    /// `--key value --key a b`
    pub const FLAGS: Self = Self { pair_sep: " ", key_val_sep: " ", tuple_sep: " ", key_prefix: "--" };

    /// `key=value,,key=a,b`
    pub const SIGNATURE: Self =
        Self { pair_sep: ",,", key_val_sep: "=", tuple_sep: ",", key_prefix: "" };
}

/// Render one value
pub fn format_value(value: &ResolvedValue, tuple_sep: &str) -> String {
    match value {
        ResolvedValue::Tuple(values) => {
            values.iter().map(ToString::to_string).collect::<Vec<_>>().join(tuple_sep)
        }
        ResolvedValue::Scalar(ParamValue::Bool(_)) => String::new(),
        ResolvedValue::Scalar(v) => v.to_string(),
    }
}

/// Render a whole configuration in `style`
pub fn params_to_string(config: &Configuration, style: RenderStyle) -> String {
    config
        .iter()
        .map(|(key, value)| {
            format!(
                "{}{}{}{}",
                style.key_prefix,
                key,
                style.key_val_sep,
                format_value(value, style.tuple_sep)
            )
        })
        .collect::<Vec<_>>()
        .join(style.pair_sep)
}

/// Command template for rendered runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandTemplate {
    /// Program and fixed arguments placed before the sampled flags
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Flag receiving `{name},,{signature}`
    #[serde(default = "default_tag_flag")]
    pub tag_flag: String,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_tag_flag() -> String {
    DEFAULT_TAG_FLAG.to_string()
}

impl Default for CommandTemplate {
    fn default() -> Self {
        Self { prefix: default_prefix(), tag_flag: default_tag_flag() }
    }
}

impl CommandTemplate {
    /// Create a template with the default tag flag
    pub fn new(prefix: &str) -> Self {
        Self { prefix: prefix.to_string(), ..Self::default() }
    }

    /// Set the tag flag
    pub fn with_tag_flag(mut self, flag: &str) -> Self {
        self.tag_flag = flag.to_string();
        self
    }

    /// Signature of a configuration
    pub fn signature(&self, config: &Configuration) -> String {
        params_to_string(config, RenderStyle::SIGNATURE)
    }

    /// Full command line for run `name`
    pub fn render(&self, name: &str, config: &Configuration) -> String {
        format!(
            "{} {} --{}={},,{}",
            self.prefix,
            params_to_string(config, RenderStyle::FLAGS),
            self.tag_flag,
            name,
            self.signature(config)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Configuration {
        let mut config = Configuration::new();
        config.set("conv_layer_n", ResolvedValue::Scalar(ParamValue::Int(2)));
        config.set(
            "dr",
            ResolvedValue::Tuple(vec![ParamValue::Float(0.5), ParamValue::Float(0.5)]),
        );
        config.set("ext_ebd", ResolvedValue::Scalar(ParamValue::Bool(true)));
        config.set("nkerns", ResolvedValue::Tuple(vec![ParamValue::Int(6), ParamValue::Int(12)]));
        config
    }

    #[test]
    fn test_format_value() {
        let tuple = ResolvedValue::Tuple(vec![ParamValue::Int(20), ParamValue::Int(5)]);
        assert_eq!(format_value(&tuple, " "), "20 5");
        assert_eq!(format_value(&tuple, ","), "20,5");
        assert_eq!(format_value(&ResolvedValue::Scalar(ParamValue::Bool(true)), " "), "");
        assert_eq!(format_value(&ResolvedValue::Scalar(ParamValue::from("tanh")), " "), "tanh");
    }

    #[test]
    fn test_flags() {
        assert_eq!(
            params_to_string(&sample_config(), RenderStyle::FLAGS),
            "--conv_layer_n 2 --dr 0.5 0.5 --ext_ebd  --nkerns 6 12"
        );
    }

    #[test]
    fn test_signature() {
        assert_eq!(
            params_to_string(&sample_config(), RenderStyle::SIGNATURE),
            "conv_layer_n=2,,dr=0.5,0.5,,ext_ebd=,,nkerns=6,12"
        );
    }

    #[test]
    fn test_render_command() {
        let template = CommandTemplate::new("python train.py");
        assert_eq!(
            template.render("run1", &sample_config()),
            "python train.py --conv_layer_n 2 --dr 0.5 0.5 --ext_ebd  --nkerns 6 12 \
             --img_prefix=run1,,conv_layer_n=2,,dr=0.5,0.5,,ext_ebd=,,nkerns=6,12"
        );
    }

    #[test]
    fn test_render_empty_config() {
        let template = CommandTemplate::new("train").with_tag_flag("tag");
        assert_eq!(template.render("x", &Configuration::new()), "train  --tag=x,,");
    }

    #[test]
    fn test_default_template() {
        let template = CommandTemplate::default();
        assert!(template.prefix.starts_with("python cnn4nlp.py"));
        assert_eq!(template.tag_flag, "img_prefix");
    }

    #[test]
    fn test_template_yaml_defaults() {
        let template: CommandTemplate = serde_yaml::from_str("prefix: ./train\n").unwrap();
        assert_eq!(template.prefix, "./train");
        assert_eq!(template.tag_flag, DEFAULT_TAG_FLAG);
    }
}
