use packshot_core::{
    AssetRole, BrandOverlay, GenerationMode, GenerationRequest, PackSize, SourceAsset,
};
use packshot_error::PipelineErrorKind;
use strum::IntoEnumIterator;

fn primary() -> SourceAsset {
    SourceAsset::new(vec![0x89, 0x50, 0x4E, 0x47], "image/png", AssetRole::Primary)
}

#[test]
fn test_pack_sizes_are_five_ten_fifteen() {
    let counts: Vec<usize> = PackSize::iter().map(PackSize::count).collect();
    assert_eq!(counts, vec![5, 10, 15]);

    for size in PackSize::iter() {
        assert_eq!(PackSize::try_from(u32::from(size)).expect("round trip"), size);
    }
}

#[test]
fn test_unsupported_pack_size_rejected() {
    for count in [0u32, 1, 4, 6, 11, 20, 100] {
        let err = PackSize::try_from(count).expect_err("not a sold pack size");
        assert_eq!(err.kind, PipelineErrorKind::UnsupportedPackSize(count));
    }
}

#[test]
fn test_pack_size_deserializes_from_count() {
    let size: PackSize = serde_json::from_str("15").expect("valid count");
    assert_eq!(size, PackSize::Large);
    assert!(serde_json::from_str::<PackSize>("12").is_err());
    assert_eq!(serde_json::to_string(&PackSize::Small).expect("serialize"), "5");
}

#[test]
fn test_minimal_request_builds() {
    let request = GenerationRequest::builder()
        .mode(GenerationMode::ModelCentric)
        .primary(primary())
        .pack_size(PackSize::Medium)
        .category("sneakers")
        .style("streetwear")
        .build()
        .expect("valid request");

    assert!(request.secondary().is_empty());
    assert!(request.model_reference().is_none());
    assert!(request.brand().is_none());
    assert_eq!(request.assets().count(), 1);
}

#[test]
fn test_assets_iterate_in_attachment_order() {
    let request = GenerationRequest::builder()
        .mode(GenerationMode::ModelCentric)
        .primary(primary())
        .secondary(vec![
            SourceAsset::new(vec![1], "image/jpeg", AssetRole::Secondary),
            SourceAsset::new(vec![2], "image/jpeg", AssetRole::Secondary),
        ])
        .model_reference(SourceAsset::new(vec![3], "image/jpeg", AssetRole::ModelReference))
        .pack_size(PackSize::Small)
        .category("hats")
        .style("outdoor")
        .brand(BrandOverlay::new(vec!["olive".to_string()], None))
        .build()
        .expect("valid request");

    let roles: Vec<AssetRole> = request.assets().map(|asset| *asset.role()).collect();
    assert_eq!(
        roles,
        vec![
            AssetRole::Primary,
            AssetRole::Secondary,
            AssetRole::Secondary,
            AssetRole::ModelReference
        ]
    );
}

#[test]
fn test_missing_primary_rejected() {
    let err = GenerationRequest::builder()
        .mode(GenerationMode::ObjectCentric)
        .pack_size(PackSize::Small)
        .category("mugs")
        .style("cozy")
        .build()
        .expect_err("primary is required");

    assert_eq!(err.kind, PipelineErrorKind::MissingPrimaryAsset);
}

#[test]
fn test_invalid_assets_rejected() {
    let cases = [
        SourceAsset::new(vec![], "image/png", AssetRole::Primary),
        SourceAsset::new(vec![1], "application/pdf", AssetRole::Primary),
        SourceAsset::new(vec![1], "image/png", AssetRole::Secondary),
    ];

    for asset in cases {
        let err = GenerationRequest::builder()
            .mode(GenerationMode::ObjectCentric)
            .primary(asset)
            .pack_size(PackSize::Small)
            .category("mugs")
            .style("cozy")
            .build()
            .expect_err("invalid primary");
        assert!(matches!(err.kind, PipelineErrorKind::InvalidAsset(_)));
    }
}

#[test]
fn test_misrouted_secondary_rejected() {
    let err = GenerationRequest::builder()
        .mode(GenerationMode::ObjectCentric)
        .primary(primary())
        .secondary(vec![SourceAsset::new(vec![1], "image/png", AssetRole::ModelReference)])
        .pack_size(PackSize::Small)
        .category("mugs")
        .style("cozy")
        .build()
        .expect_err("secondary slot holds a model reference");

    assert!(matches!(err.kind, PipelineErrorKind::InvalidAsset(_)));
}

#[test]
fn test_missing_labels_reported_as_builder_error() {
    let err = GenerationRequest::builder()
        .mode(GenerationMode::ObjectCentric)
        .primary(primary())
        .pack_size(PackSize::Small)
        .build()
        .expect_err("category and style are required");

    assert!(matches!(err.kind, PipelineErrorKind::Builder(_)));
}

#[test]
fn test_brand_overlay_emptiness() {
    assert!(BrandOverlay::default().is_empty());
    assert!(BrandOverlay::new(vec![], Some(String::new())).is_empty());
    assert!(!BrandOverlay::new(vec![], Some("playful".to_string())).is_empty());
    assert!(!BrandOverlay::new(vec!["#fff".to_string()], None).is_empty());
}

#[test]
fn test_deserialized_request_is_validated() {
    let request = GenerationRequest::builder()
        .mode(GenerationMode::ObjectCentric)
        .primary(primary())
        .pack_size(PackSize::Large)
        .category("watches")
        .style("minimal")
        .build()
        .expect("valid request");

    let json = serde_json::to_value(&request).expect("serialize");
    let decoded: GenerationRequest = serde_json::from_value(json.clone()).expect("valid json");
    assert_eq!(decoded, request);

    let mut empty_primary = json.clone();
    empty_primary["primary"]["bytes"] = serde_json::json!([]);
    assert!(serde_json::from_value::<GenerationRequest>(empty_primary).is_err());

    let mut wrong_type = json;
    wrong_type["primary"]["media_type"] = serde_json::json!("text/plain");
    let err = serde_json::from_value::<GenerationRequest>(wrong_type).expect_err("not an image");
    assert!(err.to_string().contains("non-image media type 'text/plain'"));
}
