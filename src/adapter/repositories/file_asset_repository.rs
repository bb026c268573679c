//! File Asset Repository Implementation
//!
//! AssetRepositoryのファイルシステム実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::entities::source_asset::SourceAsset;
use crate::domain::error::ConvertError;
use crate::domain::repositories::asset_repository::AssetRepository;

/// ファイルシステムベースのアセットリポジトリ
///
/// シンボリックリンクのディレクトリは辿らない（循環を避けるため）。
/// 通常ファイルを指すシンボリックリンクは対象に含める。
pub struct FileAssetRepository;

impl FileAssetRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// アセットを発見する（内部実装）
    ///
    /// 入力ルートの内側にある出力ルートは走査から除外する。
    /// 出力ルートが入力ルートと同じ場合は除外しない。
    fn discover_assets_internal(input_root: &Path, output_root: &Path) -> Result<Vec<SourceAsset>> {
        if !input_root.exists() {
            return Err(ConvertError::InputDirectoryNotFound(input_root.to_path_buf()).into());
        }
        if !input_root.is_dir() {
            return Err(ConvertError::InputNotADirectory(input_root.to_path_buf()).into());
        }

        let mut assets = Vec::new();

        let walker = WalkDir::new(input_root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || entry.path() != output_root);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    Self::handle_walk_error(e, input_root)?;
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            match SourceAsset::from_path(path) {
                Some(asset) => assets.push(asset),
                None => debug!("Ignoring unsupported file: {}", path.display()),
            }
        }

        info!(
            "Found {} model file(s) in {}",
            assets.len(),
            input_root.display()
        );

        Ok(assets)
    }

    /// 走査エラーを処理する
    ///
    /// 入力ルート自体が読めない場合はエラー、配下のエントリは警告してスキップ
    fn handle_walk_error(err: walkdir::Error, input_root: &Path) -> Result<()> {
        if err.depth() == 0 {
            return Err(err)
                .with_context(|| format!("Failed to read input dir: {}", input_root.display()));
        }
        warn!("Skipping unreadable entry under {}: {}", input_root.display(), err);
        Ok(())
    }

    fn prepare_target_dir_sync(target: &Path) -> Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
        }
        Ok(())
    }

    fn discard_target_sync(target: &Path) -> Result<()> {
        match fs::remove_file(target) {
            Ok(()) => {
                info!("Discarded partial output: {}", target.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove output file: {}", target.display())),
        }
    }

    async fn run_blocking<T, F>(f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        tokio::task::spawn_blocking(f)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

#[async_trait]
impl AssetRepository for FileAssetRepository {
    async fn discover_assets(
        &self,
        input_root: &Path,
        output_root: &Path,
    ) -> Result<Vec<SourceAsset>> {
        let input_root = input_root.to_path_buf();
        let output_root = output_root.to_path_buf();
        Self::run_blocking(move || Self::discover_assets_internal(&input_root, &output_root))
            .await
    }

    async fn target_exists(&self, target: &Path) -> bool {
        tokio::fs::metadata(target)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn prepare_target_dir(&self, target: &Path) -> Result<()> {
        let target: PathBuf = target.to_path_buf();
        Self::run_blocking(move || Self::prepare_target_dir_sync(&target)).await
    }

    async fn discard_target(&self, target: &Path) -> Result<()> {
        let target: PathBuf = target.to_path_buf();
        Self::run_blocking(move || Self::discard_target_sync(&target)).await
    }
}

impl Default for FileAssetRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"model").unwrap();
    }

    fn discovered_paths(root: &Path) -> Vec<PathBuf> {
        discovered_paths_excluding(root, &root.join("out"))
    }

    fn discovered_paths_excluding(root: &Path, output_root: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = FileAssetRepository::discover_assets_internal(root, output_root)
            .unwrap()
            .into_iter()
            .map(|a| a.path().to_path_buf())
            .collect();
        paths.sort();
        paths
    }

    #[test]
    fn test_discover_filters_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("models/fox.fbx"));
        touch(&root.join("models/tree.OBJ"));
        touch(&root.join("models/deep/nested/rock.gltf"));
        touch(&root.join("models/ready.glb"));
        touch(&root.join("textures/fox.png"));
        touch(&root.join("README.md"));

        let paths = discovered_paths(root);

        assert_eq!(
            paths,
            vec![
                root.join("models/deep/nested/rock.gltf"),
                root.join("models/fox.fbx"),
                root.join("models/ready.glb"),
                root.join("models/tree.OBJ"),
            ]
        );
    }

    #[test]
    fn test_discover_ignores_directories_with_model_extension() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("weird.fbx")).unwrap();

        assert!(discovered_paths(root).is_empty());
    }

    #[test]
    fn test_discover_missing_root() {
        let err = FileAssetRepository::discover_assets_internal(
            Path::new("/nonexistent/models"),
            Path::new("/nonexistent/out"),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::InputDirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_discover_root_is_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("fox.fbx");
        touch(&file);

        let err =
            FileAssetRepository::discover_assets_internal(&file, temp_dir.path()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::InputNotADirectory(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_does_not_follow_symlinked_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("in");
        touch(&root.join("a/fox.fbx"));
        std::os::unix::fs::symlink(&root, root.join("a/loop")).unwrap();

        let outside = temp_dir.path().join("shared/tree.obj");
        touch(&outside);
        std::os::unix::fs::symlink(&outside, root.join("tree.obj")).unwrap();

        let paths = discovered_paths(&root);

        assert_eq!(paths, vec![root.join("a/fox.fbx"), root.join("tree.obj")]);
    }

    #[test]
    fn test_discover_skips_output_root_inside_input() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("models/fox.fbx"));
        touch(&root.join("public/models/fox.glb"));

        let paths = discovered_paths_excluding(root, &root.join("public"));

        assert_eq!(paths, vec![root.join("models/fox.fbx")]);
    }

    #[test]
    fn test_discover_same_input_and_output_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("models/fox.fbx"));

        let paths = discovered_paths_excluding(root, root);

        assert_eq!(paths, vec![root.join("models/fox.fbx")]);
    }

    #[test]
    fn test_walk_error_on_root_is_fatal() {
        let missing = Path::new("/nonexistent/models");
        let err = WalkDir::new(missing).into_iter().next().unwrap().unwrap_err();
        assert_eq!(err.depth(), 0);

        let result = FileAssetRepository::handle_walk_error(err, missing);

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.starts_with("Failed to read input dir: /nonexistent/models"));
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_skips_unreadable_subdirectory() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("models/fox.fbx"));
        touch(&root.join("locked/tree.obj"));
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // rootなど権限チェックを受けない環境では読めてしまうので検証しない
        let privileged = fs::read_dir(&locked).is_ok();
        let paths = discovered_paths(root);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if !privileged {
            assert_eq!(paths, vec![root.join("models/fox.fbx")]);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_unreadable_root_is_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("in");
        touch(&root.join("fox.fbx"));
        fs::set_permissions(&root, fs::Permissions::from_mode(0o000)).unwrap();

        let privileged = fs::read_dir(&root).is_ok();
        let result = FileAssetRepository::discover_assets_internal(&root, temp_dir.path());
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();

        if !privileged {
            assert!(result.is_err());
        }
    }

    #[tokio::test]
    async fn test_target_exists() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileAssetRepository::new();
        let target = temp_dir.path().join("fox.glb");

        assert!(!repo.target_exists(&target).await);
        touch(&target);
        assert!(repo.target_exists(&target).await);
        assert!(!repo.target_exists(temp_dir.path()).await);
    }

    #[tokio::test]
    async fn test_prepare_target_dir_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileAssetRepository::new();
        let target = temp_dir.path().join("out/models/animals/fox.glb");

        repo.prepare_target_dir(&target).await.unwrap();

        assert!(temp_dir.path().join("out/models/animals").is_dir());
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_discard_target() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileAssetRepository::new();
        let target = temp_dir.path().join("fox.glb");
        touch(&target);

        repo.discard_target(&target).await.unwrap();
        assert!(!target.exists());

        // 存在しない場合も成功
        repo.discard_target(&target).await.unwrap();
    }
}
