//! # SourceAsset Entity
//!
//! 変換元となる3Dモデルファイルのドメインエンティティ

use std::fmt;
use std::path::{Path, PathBuf};

/// 変換対象として扱う拡張子（小文字、ドットなし）
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["fbx", "obj", "gltf", "glb"];

/// 出力ファイルの拡張子
pub const TARGET_EXTENSION: &str = "glb";

/// 変換元モデルのフォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFormat {
    Fbx,
    Obj,
    Gltf,
    Glb,
}

impl ModelFormat {
    /// 拡張子からフォーマットを判定します（大文字小文字を区別しない）。
    ///
    /// # 例
    ///
    /// ```
    /// use glbatch::domain::entities::source_asset::ModelFormat;
    ///
    /// assert_eq!(ModelFormat::from_extension("FBX"), Some(ModelFormat::Fbx));
    /// assert_eq!(ModelFormat::from_extension(".gltf"), Some(ModelFormat::Gltf));
    /// assert_eq!(ModelFormat::from_extension("blend"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "fbx" => Some(Self::Fbx),
            "obj" => Some(Self::Obj),
            "gltf" => Some(Self::Gltf),
            "glb" => Some(Self::Glb),
            _ => None,
        }
    }

    /// パスの拡張子からフォーマットを判定
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// 小文字の拡張子を返す
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Fbx => "fbx",
            Self::Obj => "obj",
            Self::Gltf => "gltf",
            Self::Glb => "glb",
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 変換元アセット
///
/// ディレクトリ走査で発見された、サポート対象拡張子を持つファイル。
/// 発見後は不変で、バッチ実行の終了とともに破棄される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAsset {
    path: PathBuf,
    format: ModelFormat,
}

impl SourceAsset {
    /// パスからアセットを作成
    ///
    /// 拡張子がサポート対象外の場合は `None` を返す
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let format = ModelFormat::from_path(&path)?;
        Some(Self { path, format })
    }

    /// ファイルのパス
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// モデルのフォーマット
    pub fn format(&self) -> ModelFormat {
        self.format
    }
}
