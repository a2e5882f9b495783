//! Mock 模型加载器
//!
//! 用于单元测试的 mock 实现，在进程内构造模型，支持注入失败场景。

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use contracts::{BoxedModel, CREATE_SYMBOL, DESTROY_SYMBOL};
use tracing::instrument;

use crate::error::{LoaderError, Result};
use crate::loaded_model::LoadedModel;
use crate::loader::ModelLoader;

/// 模型构造函数
pub type ModelFactory = Arc<dyn Fn() -> BoxedModel + Send + Sync>;

/// Mock 加载器配置
#[derive(Debug, Default, Clone)]
pub struct MockLoaderConfig {
    /// 模拟库无法打开
    pub fail_load: bool,
    /// 模拟缺失的入口符号（`create` 或 `destroy`）
    pub missing_symbol: Option<String>,
}

/// Mock 模型加载器
pub struct MockModelLoader {
    /// 配置（可注入失败场景）
    config: MockLoaderConfig,
    /// 模型构造函数
    factory: ModelFactory,
    /// 加载尝试次数
    load_count: AtomicUsize,
    /// 请求过的路径
    requested_paths: Mutex<Vec<PathBuf>>,
}

impl MockModelLoader {
    /// 使用构造函数创建 mock 加载器
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> BoxedModel + Send + Sync + 'static,
    {
        Self::with_config(factory, MockLoaderConfig::default())
    }

    /// 使用构造函数和配置创建 mock 加载器
    pub fn with_config<F>(factory: F, config: MockLoaderConfig) -> Self
    where
        F: Fn() -> BoxedModel + Send + Sync + 'static,
    {
        Self {
            config,
            factory: Arc::new(factory),
            load_count: AtomicUsize::new(0),
            requested_paths: Mutex::new(Vec::new()),
        }
    }

    /// 获取加载尝试次数
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }

    /// 获取所有请求过的路径
    pub fn requested_paths(&self) -> Vec<PathBuf> {
        self.requested_paths
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }
}

impl ModelLoader for MockModelLoader {
    #[instrument(name = "mock_model_load", skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> Result<LoadedModel> {
        self.load_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut paths) = self.requested_paths.lock() {
            paths.push(path.to_path_buf());
        }

        if self.config.fail_load {
            return Err(LoaderError::load(path, "mock failure"));
        }

        if let Some(symbol) = &self.config.missing_symbol {
            return Err(LoaderError::symbol(path, symbol.clone(), "mock missing symbol"));
        }

        Ok(LoadedModel::in_process(
            format!("mock:{}", path.display()),
            (self.factory)(),
        ))
    }
}

impl MockLoaderConfig {
    /// 模拟缺失 `create`
    pub fn missing_create() -> Self {
        Self {
            missing_symbol: Some(CREATE_SYMBOL.to_string()),
            ..Default::default()
        }
    }

    /// 模拟缺失 `destroy`
    pub fn missing_destroy() -> Self {
        Self {
            missing_symbol: Some(DESTROY_SYMBOL.to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use contracts::{
        ModelError, ParameterServer, VehicleControlInput, VehicleMotionModel, VehicleState,
    };

    use super::*;

    struct IdentityModel;

    impl VehicleMotionModel for IdentityModel {
        fn set_parameter_server(&mut self, _params: Arc<dyn ParameterServer>) {}

        fn predict_constant(
            &self,
            initial_state: VehicleState,
            _timestep: f64,
            _horizon: f64,
        ) -> std::result::Result<Vec<VehicleState>, ModelError> {
            Ok(vec![initial_state])
        }

        fn predict_with_controls(
            &self,
            initial_state: VehicleState,
            _controls: &[VehicleControlInput],
            _timestep: f64,
        ) -> std::result::Result<Vec<VehicleState>, ModelError> {
            Ok(vec![initial_state])
        }
    }

    #[test]
    fn test_mock_load_success() {
        let loader = MockModelLoader::new(|| Box::new(IdentityModel));
        let loaded = loader.load(Path::new("libidentity.so")).unwrap();

        assert_eq!(loader.load_count(), 1);
        assert_eq!(loader.requested_paths(), vec![PathBuf::from("libidentity.so")]);
        assert_eq!(loaded.source(), "mock:libidentity.so");
        assert!(!loaded.is_dynamic());
    }

    #[test]
    fn test_mock_load_failure() {
        let loader = MockModelLoader::with_config(
            || Box::new(IdentityModel),
            MockLoaderConfig {
                fail_load: true,
                ..Default::default()
            },
        );
        let err = loader.load(Path::new("libidentity.so")).unwrap_err();
        assert!(matches!(err, LoaderError::Load { .. }));
        assert_eq!(loader.load_count(), 1);
    }

    #[test]
    fn test_mock_missing_symbol() {
        let loader =
            MockModelLoader::with_config(|| Box::new(IdentityModel), MockLoaderConfig::missing_destroy());
        let err = loader.load(Path::new("libidentity.so")).unwrap_err();
        match err {
            LoaderError::Symbol { symbol, .. } => assert_eq!(symbol, "destroy"),
            other => panic!("expected symbol error, got: {other}"),
        }
    }
}
