//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

use crate::application::dto::conversion_params::ConversionParams;

/// FBX/OBJ/GLTFモデルをGLBに一括変換するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "glbatch")]
#[command(
    about = "Batch-convert FBX/OBJ/GLTF models to GLB with a headless converter",
    long_about = None
)]
pub struct Args {
    /// Directory containing source models
    #[arg(short, long)]
    pub input_dir: String,

    /// Directory for output .glb files
    #[arg(short, long)]
    pub output_dir: String,

    /// Uniform scale for all models
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Overwrite existing outputs
    #[arg(long)]
    pub overwrite: bool,

    /// Print what would be converted without running the converter
    #[arg(long)]
    pub dry_run: bool,

    /// Config file path
    #[arg(short, long, default_value = "./.glbatch/config.json")]
    pub config: String,

    /// Converter program (overrides the config file)
    #[arg(long)]
    pub converter: Option<String>,
}

impl Args {
    /// 変換パラメータを取り出す
    pub fn conversion_params(&self) -> ConversionParams {
        ConversionParams::new(self.scale, self.overwrite, self.dry_run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["glbatch", "--input-dir", "src", "--output-dir", "out"]);
        assert_eq!(args.input_dir, "src");
        assert_eq!(args.output_dir, "out");
        assert_eq!(args.scale, 1.0);
        assert!(!args.overwrite);
        assert!(!args.dry_run);
        assert_eq!(args.config, "./.glbatch/config.json");
        assert_eq!(args.converter, None);
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from(["glbatch", "-i", "a", "-o", "b", "-c", "/etc/glbatch.json"]);
        assert_eq!(args.input_dir, "a");
        assert_eq!(args.output_dir, "b");
        assert_eq!(args.config, "/etc/glbatch.json");
    }

    #[test]
    fn test_args_combined() {
        let args = Args::parse_from([
            "glbatch",
            "-i",
            "assets_src/animals",
            "-o",
            "public/models",
            "--scale",
            "0.01",
            "--overwrite",
            "--dry-run",
            "--converter",
            "/opt/blender/blender",
        ]);
        assert_eq!(args.scale, 0.01);
        assert!(args.overwrite);
        assert!(args.dry_run);
        assert_eq!(args.converter.as_deref(), Some("/opt/blender/blender"));

        let params = args.conversion_params();
        assert_eq!(params, ConversionParams::new(0.01, true, true));
    }

    #[test]
    fn test_args_require_dirs() {
        assert!(Args::try_parse_from(["glbatch", "-i", "src"]).is_err());
        assert!(Args::try_parse_from(["glbatch", "-o", "out"]).is_err());
    }

    #[test]
    fn test_args_reject_non_numeric_scale() {
        assert!(Args::try_parse_from(["glbatch", "-i", "a", "-o", "b", "--scale", "big"]).is_err());
    }
}
