//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 参数文件 -> accessor -> mock 模型 e2e 测试
//! - 动态库加载与 destroy 生命周期测试

#[cfg(test)]
mod contract_tests {
    use contracts::{KinematicLimits, VehicleState, VEHICLE_MODEL_LIB_PATH_KEY};

    #[test]
    fn test_parameter_keys_snapshot() {
        assert_eq!(VEHICLE_MODEL_LIB_PATH_KEY, "vehicle_model_lib_path");
        assert_eq!(
            KinematicLimits::PARAM_KEYS,
            [
                "max_forward_speed",
                "max_reverse_speed",
                "forward_acceleration_limit",
                "forward_deceleration_limit",
                "reverse_acceleration_limit",
                "reverse_deceleration_limit",
                "max_steering_angle",
                "min_steering_angle",
                "max_steering_angle_rate",
                "max_trailer_angle",
                "min_trailer_angle",
            ]
        );
    }

    #[test]
    fn test_vehicle_state_json_shape() {
        let json = serde_json::to_value(VehicleState::default()).unwrap();
        let fields = json.as_object().unwrap();
        assert_eq!(fields.len(), 10);
        for key in [
            "x_pos",
            "y_pos",
            "orientation",
            "longitudinal_vel",
            "lateral_vel",
            "yaw_rate",
            "front_wheel_rotation_rate",
            "rear_wheel_rotation_rate",
            "steering_angle",
            "trailer_angle",
        ] {
            assert!(fields.contains_key(key), "missing {key}");
        }
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;

    use config_loader::{ConfigFormat, ParameterStore};
    use contracts::{BoxedModel, ParameterServer, VehicleControlInput, VehicleState};
    use mock_vehicle_model::MockVehicleModel;
    use model_loader::MockModelLoader;
    use proptest::prelude::*;
    use vehicle_model::{AccessorError, Field, ValidationError, VehicleModelAccessor};

    const PARAMS_TOML: &str = r#"
vehicle_model_lib_path = "/opt/models/libmock_vehicle_model.so"
max_forward_speed = 30.0
max_reverse_speed = 5.0
forward_acceleration_limit = 3.0
forward_deceleration_limit = -6.0
reverse_acceleration_limit = 1.0
reverse_deceleration_limit = -2.0
max_steering_angle = 4.0
min_steering_angle = -4.0
max_steering_angle_rate = 2.0
max_trailer_angle = 1.2
min_trailer_angle = -1.2

[mock_vehicle_model]
x_offset = 5.0
"#;

    fn params() -> Arc<dyn ParameterServer> {
        Arc::new(ParameterStore::load_from_str(PARAMS_TOML, ConfigFormat::Toml).unwrap())
    }

    fn accessor() -> VehicleModelAccessor<MockModelLoader> {
        let loader = MockModelLoader::new(|| Box::new(MockVehicleModel::default()) as BoxedModel);
        VehicleModelAccessor::with_parameters(loader, params()).unwrap()
    }

    fn steer(angle: f64) -> VehicleControlInput {
        VehicleControlInput::new(0.0, angle)
    }

    /// End-to-end: parameter file -> accessor -> mock model
    #[test]
    fn test_e2e_controls_prediction() {
        let accessor = accessor();
        let initial = VehicleState {
            x_pos: 1.0,
            y_pos: 2.0,
            ..Default::default()
        };

        let states = accessor
            .predict_with_controls(initial, &[steer(0.1), steer(0.2), steer(0.3)], 0.1)
            .unwrap();

        assert_eq!(states.len(), 3);
        assert!(states.iter().all(|s| s.x_pos == 6.0 && s.y_pos == 2.0));
    }

    #[test]
    fn test_e2e_constant_prediction() {
        let accessor = accessor();
        let states = accessor
            .predict_constant(VehicleState::default(), 0.1, 1.0)
            .unwrap();
        assert!(!states.is_empty());
        assert!(states.iter().all(|s| s.x_pos == 5.0));
    }

    #[test]
    fn test_e2e_rate_scenarios() {
        let accessor = accessor();
        let initial = VehicleState::default();

        let err = accessor
            .predict_with_controls(initial, &[steer(3.0)], 1.0)
            .unwrap_err();
        match err {
            AccessorError::Validation(ValidationError::ControlInput { index, violation }) => {
                assert_eq!(index, 0);
                assert_eq!(violation.field, Field::SteeringAngleRate);
            }
            other => panic!("unexpected: {other}"),
        }

        assert!(accessor
            .predict_with_controls(initial, &[steer(1.0), steer(3.0)], 1.0)
            .is_ok());

        let err = accessor
            .predict_with_controls(initial, &[steer(1.0), steer(3.5)], 1.0)
            .unwrap_err();
        match err {
            AccessorError::Validation(v) => assert_eq!(v.index(), Some(1)),
            other => panic!("unexpected: {other}"),
        }

        let stats = accessor.stats();
        assert_eq!(stats.control_requests, 3);
        assert_eq!(stats.rejected, 2);
    }

    #[test]
    fn test_e2e_timestep_above_horizon() {
        let err = accessor()
            .predict_constant(VehicleState::default(), 5.0, 2.0)
            .unwrap_err();
        assert!(matches!(err, AccessorError::Validation(ValidationError::Window(_))));
    }

    #[test]
    fn test_e2e_json_params() {
        let json = r#"{
            "vehicle_model_lib_path": "/opt/models/libmock_vehicle_model.so",
            "max_forward_speed": 30,
            "max_reverse_speed": 5,
            "forward_acceleration_limit": 3,
            "forward_deceleration_limit": -6,
            "reverse_acceleration_limit": 1,
            "reverse_deceleration_limit": -2,
            "max_steering_angle": 4,
            "min_steering_angle": -4,
            "max_steering_angle_rate": 2,
            "max_trailer_angle": 1.2,
            "min_trailer_angle": -1.2,
            "mock_vehicle_model": { "x_offset": -2.0 }
        }"#;
        let store = ParameterStore::load_from_str(json, ConfigFormat::Json).unwrap();
        let loader = MockModelLoader::new(|| Box::new(MockVehicleModel::default()) as BoxedModel);
        let accessor = VehicleModelAccessor::with_parameters(loader, Arc::new(store)).unwrap();

        assert_eq!(accessor.limits().unwrap().forward_deceleration_limit, -6.0);
        let states = accessor
            .predict_with_controls(VehicleState::default(), &[steer(0.0)], 0.1)
            .unwrap();
        assert_eq!(states[0].x_pos, -2.0);
    }

    #[test]
    fn test_e2e_shared_across_threads() {
        let accessor = Arc::new(accessor());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let accessor = Arc::clone(&accessor);
                std::thread::spawn(move || {
                    let initial = VehicleState {
                        x_pos: i as f64,
                        ..Default::default()
                    };
                    accessor
                        .predict_with_controls(initial, &[steer(0.1); 5], 0.1)
                        .unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let states = handle.join().unwrap();
            assert_eq!(states.len(), 5);
            assert_eq!(states[0].x_pos, i as f64 + 5.0);
        }
        assert_eq!(accessor.stats().succeeded, 4);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_valid_sequences_reach_model(
            steps in prop::collection::vec(-0.15..=0.15f64, 0..40),
        ) {
            let accessor = accessor();
            let mut angle = 0.0f64;
            let controls: Vec<_> = steps
                .into_iter()
                .map(|delta| {
                    angle = (angle + delta).clamp(-4.0, 4.0);
                    steer(angle)
                })
                .collect();

            let states = accessor
                .predict_with_controls(VehicleState::default(), &controls, 0.1)
                .unwrap();
            prop_assert_eq!(states.len(), controls.len());
        }
    }
}

#[cfg(test)]
mod dylib_tests {
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex, PoisonError};

    use config_loader::ParameterStore;
    use contracts::{VehicleControlInput, VehicleState, VEHICLE_MODEL_LIB_PATH_KEY};
    use libloading::Library;
    use mock_vehicle_model::DROPPED_INSTANCES_SYMBOL;
    use model_loader::{DylibModelLoader, ModelLoader};
    use vehicle_model::VehicleModelAccessor;

    /// Tests in this module share one loaded copy of the plugin and its counter
    static PLUGIN_LOCK: Mutex<()> = Mutex::new(());

    /// Locate the mock plugin cargo built beside the test binary
    ///
    /// Dependencies land in `target/<profile>/deps`, `cargo build` puts it in
    /// `target/<profile>`.
    fn mock_library() -> PathBuf {
        let exe = std::env::current_exe().unwrap();
        let name = format!(
            "{}mock_vehicle_model{}",
            std::env::consts::DLL_PREFIX,
            std::env::consts::DLL_SUFFIX
        );
        exe.ancestors()
            .skip(1)
            .take(2)
            .map(|dir| dir.join(&name))
            .find(|path| path.exists())
            .unwrap_or_else(|| panic!("{name} not found near {}", exe.display()))
    }

    /// Separate handle on the plugin, keeps it resident and reads its drop counter
    struct DropCounter {
        read: extern "C" fn() -> usize,
        _library: Library,
    }

    impl DropCounter {
        fn open(path: &Path) -> Self {
            // SAFETY: the mock plugin has no load-time side effects, and the
            // symbol signature matches `mock_vehicle_model_dropped_instances`.
            let library = unsafe { Library::new(path) }.unwrap();
            let read = unsafe {
                *library
                    .get::<extern "C" fn() -> usize>(DROPPED_INSTANCES_SYMBOL.as_bytes())
                    .unwrap()
            };
            Self {
                read,
                _library: library,
            }
        }

        fn count(&self) -> usize {
            (self.read)()
        }
    }

    #[test]
    fn test_dylib_round_trip() {
        let _guard = PLUGIN_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let path = mock_library();
        let counter = DropCounter::open(&path);
        let before = counter.count();

        let mut model = DylibModelLoader::new().load(&path).unwrap();
        assert!(model.is_dynamic());
        model
            .model_mut()
            .set_parameter_server(Arc::new(ParameterStore::new()));
        let states = model
            .model()
            .predict_with_controls(VehicleState::default(), &[VehicleControlInput::default(); 2], 0.1)
            .unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].x_pos, 5.0);
        assert_eq!(counter.count(), before);

        drop(model);
        assert_eq!(counter.count(), before + 1, "destroy was not called");
    }

    #[test]
    fn test_dylib_accessor() {
        let _guard = PLUGIN_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let path = mock_library();
        let counter = DropCounter::open(&path);
        let before = counter.count();

        let mut store = ParameterStore::new();
        store.insert(VEHICLE_MODEL_LIB_PATH_KEY, path.display().to_string());
        for (key, value) in [
            ("max_forward_speed", 30.0),
            ("max_reverse_speed", 5.0),
            ("forward_acceleration_limit", 3.0),
            ("forward_deceleration_limit", -6.0),
            ("reverse_acceleration_limit", 1.0),
            ("reverse_deceleration_limit", -2.0),
            ("max_steering_angle", 0.6),
            ("min_steering_angle", -0.6),
            ("max_steering_angle_rate", 1.0),
            ("max_trailer_angle", 1.2),
            ("min_trailer_angle", -1.2),
        ] {
            store.insert(key, value);
        }
        store.insert("mock_vehicle_model/x_offset", 1.5);

        let accessor = VehicleModelAccessor::from_parameters(Arc::new(store)).unwrap();
        let states = accessor
            .predict_constant(VehicleState::default(), 0.5, 2.0)
            .unwrap();
        assert_eq!(states.len(), 4);
        assert!(states.iter().all(|s| s.x_pos == 1.5));

        drop(accessor);
        assert_eq!(counter.count(), before + 1, "destroy was not called");
    }

    #[test]
    fn test_missing_library() {
        let err = DylibModelLoader::new()
            .load(&PathBuf::from("/nonexistent/libmock_vehicle_model.so"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/libmock_vehicle_model.so"));
    }
}
