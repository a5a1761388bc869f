use std::str::FromStr;

use burn::config::Config;

use crate::{
    config::{
        CropLocation, DatasetName, ExperimentConfig, Method, Purpose, SureAlternative,
        TransformKind,
    },
    error::ReconError,
};

pub type TestBackend = burn::backend::NdArray<f32>;

#[test]
fn test_default_config_is_valid() {
    let config = ExperimentConfig::new();
    assert!(config.validate().is_ok());
    assert!((config.sigma() - 5.0 / 255.0).abs() < 1e-12);
}

#[test]
fn test_zero_crop_size() {
    let mut config = ExperimentConfig::new();
    config.pairs.crop_size = 0;

    match config.validate() {
        Err(ReconError::InvalidConfiguration { reason }) => {
            assert!(reason.contains("crop sizes"));
        }
        _ => panic!("Expected InvalidConfiguration error"),
    }
}

#[test]
fn test_margin_without_partial_sure() {
    let mut config = ExperimentConfig::new();
    config.sure.margin = Some(4);

    match config.validate() {
        Err(ReconError::InvalidConfiguration { reason }) => {
            assert!(reason.contains("partial SURE"));
        }
        _ => panic!("Expected InvalidConfiguration error"),
    }
}

#[test]
fn test_single_image_needs_duplicates() {
    let mut config = ExperimentConfig::new().with_dataset(DatasetName::SingleImage);
    config.single_image.duplicates_count = 0;

    assert!(config.validate().unwrap_err().is_configuration_error());
}

#[test]
fn test_config_json_round_trip() {
    let config = ExperimentConfig::new()
        .with_method(Method::Noise2Inverse)
        .with_split("test".to_string());

    let json = config.to_string();
    let restored = ExperimentConfig::load_binary(json.as_bytes()).unwrap();

    assert_eq!(restored.method, Method::Noise2Inverse);
    assert_eq!(restored.split, "test");
}

#[test]
fn test_external_names_parse() {
    assert_eq!(DatasetName::from_str("single_image").unwrap(), DatasetName::SingleImage);
    assert_eq!(Purpose::from_str("test").unwrap(), Purpose::Test);
    assert_eq!(Method::from_str("noise2inverse").unwrap(), Method::Noise2Inverse);
    assert_eq!(
        TransformKind::from_str("Rotations+Shifts").unwrap(),
        TransformKind::RotationsShifts
    );
    assert_eq!(SureAlternative::from_str("r2r").unwrap(), SureAlternative::R2r);
    assert_eq!(CropLocation::from_str("3, 5").unwrap(), CropLocation::Fixed(3, 5));
    assert_eq!(Method::Css.as_str(), "css");
}

#[test]
fn test_unknown_names_are_configuration_errors() {
    let errors = [
        DatasetName::from_str("imagenet").unwrap_err(),
        Purpose::from_str("validate").unwrap_err(),
        Method::from_str("dip").unwrap_err(),
        TransformKind::from_str("Flips").unwrap_err(),
        SureAlternative::from_str("noise2score").unwrap_err(),
        CropLocation::from_str("centre").unwrap_err(),
    ];

    assert!(matches!(errors[0], ReconError::UnknownDataset { .. }));
    assert!(matches!(errors[1], ReconError::UnknownPurpose { .. }));
    assert!(matches!(errors[2], ReconError::UnknownMethod { .. }));
    assert!(matches!(errors[3], ReconError::UnknownTransform { .. }));
    assert!(matches!(errors[4], ReconError::UnknownSureAlternative { .. }));
    assert!(errors.iter().all(ReconError::is_configuration_error));
}

#[test]
fn test_crop_error_describes_window_and_signal() {
    let error = ReconError::CropOutOfBounds {
        top: 4,
        left: 2,
        height: 16,
        width: 12,
        available_height: 10,
        available_width: 20,
    };

    assert_eq!(
        error.to_string(),
        "Crop of 16x12 at (4, 2) does not fit a 10x20 signal"
    );
    assert!(!error.is_configuration_error());
}
