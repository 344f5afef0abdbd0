//! Render prompt assembly.

use packshot_core::{AssetRole, BrandOverlay, GenerationMode, Input, RenderTask};

/// Builds the instruction text for one render task.
///
/// Sections appear in a fixed order: identity lock, mode direction, shot,
/// then brand lines when an overlay is present.
pub fn render_prompt(task: &RenderTask) -> String {
    let context = task.context();
    let mut sections = vec![
        identity_lock(context.audit().as_str()),
        mode_direction(*context.mode()).to_string(),
        format!("Shot: {}", task.shot()),
    ];
    if let Some(brand) = context.brand().as_ref().filter(|brand| !brand.is_empty()) {
        sections.push(brand_lines(brand));
    }
    sections.join("\n\n")
}

/// Prompt text followed by every asset, each preceded by a short label.
pub fn render_inputs(task: &RenderTask) -> Vec<Input> {
    let mut inputs = vec![Input::Text(render_prompt(task))];
    for asset in task.context().assets() {
        inputs.push(Input::Text(asset_label(*asset.role()).to_string()));
        inputs.push(asset.to_input());
    }
    inputs
}

fn identity_lock(audit: &str) -> String {
    format!(
        "IDENTITY LOCK. The product in the attached images must be reproduced exactly. \
         Preserve every fact below: all text and logos letter for letter, the silhouette \
         and proportions, the materials and colours. Do not redesign, relabel or restyle it.\n\
         Product facts: {audit}"
    )
}

fn mode_direction(mode: GenerationMode) -> &'static str {
    match mode {
        GenerationMode::ObjectCentric => {
            "Direction: a professional product photograph with the product as the sole hero. \
             No people."
        }
        GenerationMode::ModelCentric => {
            "Direction: a professional photograph of a human model naturally wearing, holding \
             or using the product. Keep the product clearly visible and unaltered."
        }
    }
}

fn brand_lines(brand: &BrandOverlay) -> String {
    let mut lines = vec!["Brand guidelines:".to_string()];
    if !brand.palette().is_empty() {
        lines.push(format!("- Colour palette: {}", brand.palette().join(", ")));
    }
    if let Some(tone) = brand.tone().as_deref().filter(|tone| !tone.is_empty()) {
        lines.push(format!("- Tone: {tone}"));
    }
    lines.join("\n")
}

fn asset_label(role: AssetRole) -> &'static str {
    match role {
        AssetRole::Primary => "Primary product image:",
        AssetRole::Secondary => "Additional view of the same product:",
        AssetRole::ModelReference => "Reference for the human model:",
    }
}
