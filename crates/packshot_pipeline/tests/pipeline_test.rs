use async_trait::async_trait;
use packshot_core::{
    AssetRole, BrandOverlay, GenerateRequest, GenerateResponse, GenerationMode,
    GenerationRequest, Input, Output, PackSize, SourceAsset,
};
use packshot_error::{InferenceError, InferenceErrorKind, PackshotResult};
use packshot_interface::InferenceDriver;
use packshot_pipeline::{BillingPolicy, Pipeline, PipelineConfig, StageModels};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use strum::IntoEnumIterator;

const AUDIT_MODEL: &str = "audit-model";
const PLAN_MODEL: &str = "plan-model";
const RENDER_MODEL: &str = "render-model";

#[derive(Clone, Copy)]
enum AuditBehavior {
    Describe,
    Fail,
    Empty,
}

#[derive(Clone, Copy)]
enum PlanBehavior {
    /// Return this many shots as a fenced JSON array
    Shots(usize),
    Fail,
    Garbage,
}

#[derive(Clone, Copy)]
enum RenderBehavior {
    Succeed,
    /// Fail every n-th render call, starting with the first
    FailEvery(usize),
    TextOnly,
}

/// Routes each call by the model it names.
struct MockDriver {
    audit: AuditBehavior,
    plan: PlanBehavior,
    render: RenderBehavior,
    render_calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockDriver {
    fn new(audit: AuditBehavior, plan: PlanBehavior, render: RenderBehavior) -> Self {
        Self {
            audit,
            plan,
            render,
            render_calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

fn unavailable() -> packshot_error::PackshotError {
    InferenceError::new(InferenceErrorKind::HttpStatus {
        status_code: 503,
        message: "unavailable".to_string(),
    })
    .into()
}

fn first_text(req: &GenerateRequest) -> String {
    req.messages()
        .iter()
        .flat_map(|message| message.content())
        .find_map(|input| match input {
            Input::Text(text) => Some(text.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

#[async_trait]
impl InferenceDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> PackshotResult<GenerateResponse> {
        match req.model().as_deref() {
            Some(AUDIT_MODEL) => match self.audit {
                AuditBehavior::Describe => Ok(GenerateResponse::new(vec![Output::Text(
                    "  blue ceramic mug, logo reads ACME  ".to_string(),
                )])),
                AuditBehavior::Fail => Err(unavailable()),
                AuditBehavior::Empty => Ok(GenerateResponse::new(vec![])),
            },
            Some(PLAN_MODEL) => match self.plan {
                PlanBehavior::Shots(count) => {
                    let shots: Vec<String> =
                        (0..count).map(|i| format!("planned shot {i}")).collect();
                    let body = serde_json::to_string(&shots).expect("serialize shots");
                    Ok(GenerateResponse::new(vec![Output::Text(format!(
                        "```json\n{body}\n```"
                    ))]))
                }
                PlanBehavior::Fail => Err(unavailable()),
                PlanBehavior::Garbage => Ok(GenerateResponse::new(vec![Output::Text(
                    "I would suggest a few nice shots".to_string(),
                )])),
            },
            Some(RENDER_MODEL) => {
                let call = self.render_calls.fetch_add(1, Ordering::SeqCst);
                let prompt = first_text(req);
                self.prompts.lock().expect("prompts lock").push(prompt.clone());
                match self.render {
                    RenderBehavior::Succeed => Ok(GenerateResponse::new(vec![
                        Output::Text("here you go".to_string()),
                        Output::Image {
                            mime: Some("image/png".to_string()),
                            data: vec![call as u8],
                        },
                    ])),
                    RenderBehavior::FailEvery(n) if call % n == 0 => Err(unavailable()),
                    RenderBehavior::FailEvery(_) => Ok(GenerateResponse::new(vec![Output::Image {
                        mime: None,
                        data: vec![1],
                    }])),
                    RenderBehavior::TextOnly => Ok(GenerateResponse::new(vec![Output::Text(
                        "cannot draw that".to_string(),
                    )])),
                }
            }
            other => panic!("unexpected model {other:?}"),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        RENDER_MODEL
    }
}

fn config() -> PipelineConfig {
    PipelineConfig::default()
        .with_concurrency_limit(2usize)
        .with_models(
            StageModels::default()
                .with_audit(AUDIT_MODEL)
                .with_plan(PLAN_MODEL)
                .with_render(RENDER_MODEL),
        )
}

fn request(mode: GenerationMode, pack_size: PackSize) -> GenerationRequest {
    GenerationRequest::builder()
        .mode(mode)
        .primary(SourceAsset::new(vec![1, 2, 3], "image/png", AssetRole::Primary))
        .secondary(vec![SourceAsset::new(vec![4, 5], "image/png", AssetRole::Secondary)])
        .pack_size(pack_size)
        .category("mugs")
        .style("cozy")
        .brand(BrandOverlay::new(vec!["#223344".to_string()], None))
        .build()
        .expect("valid request")
}

fn pipeline(driver: &Arc<MockDriver>) -> Pipeline<MockDriver> {
    Pipeline::new(Arc::clone(driver), config())
}

#[tokio::test]
async fn test_happy_path_renders_planned_shots_in_order() {
    let driver = Arc::new(MockDriver::new(
        AuditBehavior::Describe,
        PlanBehavior::Shots(5),
        RenderBehavior::Succeed,
    ));

    let result = pipeline(&driver)
        .run(&request(GenerationMode::ObjectCentric, PackSize::Small))
        .await
        .expect("run");

    assert_eq!(result.len(), 5);
    assert!(!result.is_partial());
    assert!(result.failures().is_empty());
    let indices: Vec<usize> = result.images().iter().map(|image| *image.index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);

    let prompts = driver.prompts();
    assert_eq!(prompts.len(), 5);
    assert!(prompts.iter().all(|p| p.contains("blue ceramic mug, logo reads ACME")));
    assert!(prompts.iter().all(|p| p.contains("#223344")));
    for i in 0..5 {
        let shot = format!("planned shot {i}");
        assert_eq!(prompts.iter().filter(|p| p.contains(&shot)).count(), 1);
    }
}

#[tokio::test]
async fn test_audit_failure_falls_back_and_run_completes() {
    for audit in [AuditBehavior::Fail, AuditBehavior::Empty] {
        let driver = Arc::new(MockDriver::new(
            audit,
            PlanBehavior::Shots(5),
            RenderBehavior::Succeed,
        ));

        let result = pipeline(&driver)
            .run(&request(GenerationMode::ObjectCentric, PackSize::Small))
            .await
            .expect("run");

        assert_eq!(result.len(), 5);
        assert!(
            driver
                .prompts()
                .iter()
                .all(|p| p.contains("standard geometry, matte material"))
        );
    }
}

#[tokio::test]
async fn test_planner_degradation_pads_with_placeholders() {
    for plan in [PlanBehavior::Fail, PlanBehavior::Garbage, PlanBehavior::Shots(0), PlanBehavior::Shots(3)] {
        let driver = Arc::new(MockDriver::new(
            AuditBehavior::Describe,
            plan,
            RenderBehavior::Succeed,
        ));

        let result = pipeline(&driver)
            .run(&request(GenerationMode::ModelCentric, PackSize::Medium))
            .await
            .expect("run");

        assert_eq!(result.len(), 10);
        let prompts = driver.prompts();
        assert!(prompts.iter().all(|p| !p.contains("planned shot")));
        assert!(prompts.iter().any(|p| p.contains("variation 10")));
    }
}

#[tokio::test]
async fn test_extra_planned_shots_are_truncated() {
    let driver = Arc::new(MockDriver::new(
        AuditBehavior::Describe,
        PlanBehavior::Shots(8),
        RenderBehavior::Succeed,
    ));

    let result = pipeline(&driver)
        .run(&request(GenerationMode::ObjectCentric, PackSize::Small))
        .await
        .expect("run");

    assert_eq!(result.len(), 5);
    assert!(!driver.prompts().iter().any(|p| p.contains("planned shot 5")));
}

#[tokio::test]
async fn test_task_count_matches_every_pack_size() {
    for pack_size in PackSize::iter() {
        let driver = Arc::new(MockDriver::new(
            AuditBehavior::Fail,
            PlanBehavior::Fail,
            RenderBehavior::Succeed,
        ));

        let result = pipeline(&driver)
            .run(&request(GenerationMode::ObjectCentric, pack_size))
            .await
            .expect("run");

        assert_eq!(driver.render_calls.load(Ordering::SeqCst), pack_size.count());
        assert_eq!(result.len(), pack_size.count());
        assert_eq!(*result.requested(), pack_size);
    }
}

#[tokio::test]
async fn test_partial_batch_is_short_and_ordered() {
    let driver = Arc::new(MockDriver::new(
        AuditBehavior::Describe,
        PlanBehavior::Shots(10),
        RenderBehavior::FailEvery(3),
    ));

    let result = pipeline(&driver)
        .run(&request(GenerationMode::ObjectCentric, PackSize::Medium))
        .await
        .expect("run");

    assert!(result.is_partial());
    assert_eq!(result.len() + result.failures().len(), 10);
    assert!(result.images().windows(2).all(|w| w[0].index() < w[1].index()));
    assert!(result.images().iter().all(|image| image.media_type() == "image/png"));
    assert_eq!(BillingPolicy::RequestedPackSize.billable_units(&result), 10);
    assert_eq!(
        BillingPolicy::DeliveredImages.billable_units(&result),
        result.len() as u32
    );
}

#[tokio::test]
async fn test_no_images_yields_empty_result() {
    let driver = Arc::new(MockDriver::new(
        AuditBehavior::Describe,
        PlanBehavior::Shots(5),
        RenderBehavior::TextOnly,
    ));

    let result = pipeline(&driver)
        .run(&request(GenerationMode::ObjectCentric, PackSize::Small))
        .await
        .expect("run");

    assert!(result.is_empty());
    assert_eq!(result.failures().len(), 5);
    assert_eq!(BillingPolicy::RequestedPackSize.billable_units(&result), 0);
}
