//! # Output Mapping Service
//!
//! 変換元パスから出力先パスを計算するサービス。
//! すべて純粋関数で、ファイルシステムには一切触れない。

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::domain::entities::conversion_job::ConversionJob;
use crate::domain::entities::source_asset::{SourceAsset, TARGET_EXTENSION};
use crate::domain::error::{ConvertError, OutputCollision};

/// 出力パスのマッピングサービス
pub struct OutputMappingService;

impl OutputMappingService {
    /// 出力先パスを計算します。
    ///
    /// 入力ルートからの相対パスを出力ルート配下に付け替え、拡張子を `.glb` に置き換える。
    /// 相対パスに `..` などが含まれる場合はエラーとし、出力ルートの外には出さない。
    ///
    /// # 例
    ///
    /// ```
    /// use std::path::{Path, PathBuf};
    /// use glbatch::domain::services::output_mapping::OutputMappingService;
    ///
    /// let target = OutputMappingService::target_path(
    ///     Path::new("/assets/src/animals/fox.fbx"),
    ///     Path::new("/assets/src"),
    ///     Path::new("/public/models"),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(target, PathBuf::from("/public/models/animals/fox.glb"));
    /// ```
    pub fn target_path(
        source: &Path,
        input_root: &Path,
        output_root: &Path,
    ) -> Result<PathBuf, ConvertError> {
        let outside = || ConvertError::SourceOutsideInputRoot {
            path: source.to_path_buf(),
            root: input_root.to_path_buf(),
        };

        let relative = source.strip_prefix(input_root).map_err(|_| outside())?;

        let escapes = relative.as_os_str().is_empty()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(outside());
        }

        Ok(output_root.join(relative).with_extension(TARGET_EXTENSION))
    }

    /// アセット一覧から変換ジョブを作成
    ///
    /// ジョブは変換元パスの辞書順に並ぶため、同じツリーに対する実行は
    /// 毎回同じジョブ列とログを生成する。
    ///
    /// # Errors
    ///
    /// 変換元が入力ルートの外にある場合、または出力先の衝突がある場合にエラーを返す
    pub fn build_jobs(
        mut assets: Vec<SourceAsset>,
        input_root: &Path,
        output_root: &Path,
    ) -> Result<Vec<ConversionJob>, ConvertError> {
        assets.sort_by(|a, b| a.path().cmp(b.path()));

        let jobs = assets
            .into_iter()
            .map(|asset| -> Result<ConversionJob, ConvertError> {
                let target = Self::target_path(asset.path(), input_root, output_root)?;
                Ok(ConversionJob::new(asset, target))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let collisions = Self::find_collisions(&jobs);
        if !collisions.is_empty() {
            return Err(ConvertError::OutputCollision(collisions));
        }

        Ok(jobs)
    }

    /// 同じ出力先を共有するジョブを検出
    ///
    /// 例えば同じディレクトリの `a.fbx` と `a.obj` はどちらも `a.glb` になる。
    /// 入力と出力のルートが重なり、`.glb` の変換元が自分自身にマッピングされる場合も衝突とする。
    /// 結果は出力先パス順、各組の変換元はジョブ順。
    pub fn find_collisions(jobs: &[ConversionJob]) -> Vec<OutputCollision> {
        let mut by_target: BTreeMap<&Path, Vec<PathBuf>> = BTreeMap::new();
        for job in jobs {
            by_target
                .entry(job.target())
                .or_default()
                .push(job.source_path().to_path_buf());
        }

        by_target
            .into_iter()
            .filter(|(target, sources)| sources.len() > 1 || sources[0].as_path() == *target)
            .map(|(target, sources)| OutputCollision {
                target: target.to_path_buf(),
                sources,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(path: &str) -> SourceAsset {
        SourceAsset::from_path(path).unwrap()
    }

    #[test]
    fn test_target_path_every_supported_extension() {
        for ext in ["fbx", "obj", "gltf", "glb", "FBX"] {
            let source = PathBuf::from(format!("/in/models/fox.{}", ext));
            let target =
                OutputMappingService::target_path(&source, Path::new("/in"), Path::new("/out"))
                    .unwrap();
            assert_eq!(target, PathBuf::from("/out/models/fox.glb"));
        }
    }

    #[test]
    fn test_target_path_keeps_inner_dots() {
        let target = OutputMappingService::target_path(
            Path::new("/in/a/fox.v2.fbx"),
            Path::new("/in"),
            Path::new("/out"),
        )
        .unwrap();
        assert_eq!(target, PathBuf::from("/out/a/fox.v2.glb"));
    }

    #[test]
    fn test_target_path_at_root_level() {
        let target = OutputMappingService::target_path(
            Path::new("/in/tree.obj"),
            Path::new("/in"),
            Path::new("/out/nested"),
        )
        .unwrap();
        assert_eq!(target, PathBuf::from("/out/nested/tree.glb"));
    }

    #[test]
    fn test_target_path_outside_root() {
        let result = OutputMappingService::target_path(
            Path::new("/elsewhere/fox.fbx"),
            Path::new("/in"),
            Path::new("/out"),
        );
        assert!(matches!(
            result,
            Err(ConvertError::SourceOutsideInputRoot { .. })
        ));
    }

    #[test]
    fn test_target_path_rejects_parent_components() {
        let result = OutputMappingService::target_path(
            Path::new("/in/../secret/fox.fbx"),
            Path::new("/in"),
            Path::new("/out"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_target_path_rejects_root_itself() {
        let result =
            OutputMappingService::target_path(Path::new("/in"), Path::new("/in"), Path::new("/out"));
        assert!(result.is_err());
    }

    #[test]
    fn test_build_jobs_sorted_by_source() {
        let assets = vec![
            asset("/in/models/tree.obj"),
            asset("/in/animals/fox.fbx"),
            asset("/in/models/bush.gltf"),
        ];

        let jobs =
            OutputMappingService::build_jobs(assets, Path::new("/in"), Path::new("/out")).unwrap();

        let sources: Vec<&Path> = jobs.iter().map(|j| j.source_path()).collect();
        assert_eq!(
            sources,
            vec![
                Path::new("/in/animals/fox.fbx"),
                Path::new("/in/models/bush.gltf"),
                Path::new("/in/models/tree.obj"),
            ]
        );
        assert_eq!(jobs[2].target(), Path::new("/out/models/tree.glb"));
    }

    #[test]
    fn test_build_jobs_detects_collision() {
        let assets = vec![
            asset("/in/a.obj"),
            asset("/in/a.fbx"),
            asset("/in/b.fbx"),
        ];

        let result = OutputMappingService::build_jobs(assets, Path::new("/in"), Path::new("/out"));

        match result {
            Err(ConvertError::OutputCollision(collisions)) => {
                assert_eq!(collisions.len(), 1);
                assert_eq!(collisions[0].target, PathBuf::from("/out/a.glb"));
                assert_eq!(
                    collisions[0].sources,
                    vec![PathBuf::from("/in/a.fbx"), PathBuf::from("/in/a.obj")]
                );
            }
            other => panic!("expected collision, got {:?}", other),
        }
    }

    #[test]
    fn test_find_collisions_none() {
        let jobs = vec![
            ConversionJob::new(asset("/in/a.fbx"), PathBuf::from("/out/a.glb")),
            ConversionJob::new(asset("/in/sub/a.fbx"), PathBuf::from("/out/sub/a.glb")),
        ];
        assert!(OutputMappingService::find_collisions(&jobs).is_empty());
    }

    #[test]
    fn test_build_jobs_rejects_target_equal_to_source() {
        let assets = vec![asset("/models/fox.glb"), asset("/models/tree.obj")];

        let result =
            OutputMappingService::build_jobs(assets, Path::new("/models"), Path::new("/models"));

        match result {
            Err(ConvertError::OutputCollision(collisions)) => {
                assert_eq!(
                    collisions,
                    vec![OutputCollision {
                        target: PathBuf::from("/models/fox.glb"),
                        sources: vec![PathBuf::from("/models/fox.glb")],
                    }]
                );
            }
            other => panic!("expected collision, got {:?}", other),
        }
    }

    #[test]
    fn test_same_root_without_glb_sources_is_allowed() {
        let assets = vec![asset("/models/fox.fbx"), asset("/models/tree.obj")];

        let jobs =
            OutputMappingService::build_jobs(assets, Path::new("/models"), Path::new("/models"))
                .unwrap();

        assert_eq!(jobs[0].target(), Path::new("/models/fox.glb"));
    }

    #[test]
    fn test_build_jobs_empty() {
        let jobs =
            OutputMappingService::build_jobs(vec![], Path::new("/in"), Path::new("/out")).unwrap();
        assert!(jobs.is_empty());
    }
}
