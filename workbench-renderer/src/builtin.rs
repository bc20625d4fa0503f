//! Built-in starter template, baked into the binary at compile time via
//! `include_str!` so the renderer works without any on-disk catalog.

use workbench_core::manifest::TemplateManifest;
use workbench_core::types::{Template, TemplateFile};

use crate::error::PlanError;

const FASTAPI_BASIC_MAIN: &str = include_str!("templates/fastapi-basic/main.py");
const FASTAPI_BASIC_MANIFEST: &str = include_str!("templates/fastapi-basic/template.json");

/// The `fastapi-basic` starter: a single-file FastAPI service.
///
/// Returns the template together with its parsed manifest.
pub fn fastapi_basic() -> Result<(Template, TemplateManifest), PlanError> {
    let manifest = TemplateManifest::from_json(FASTAPI_BASIC_MANIFEST)?;
    let template = Template::new(
        "fastapi-basic",
        vec![TemplateFile::new("main.py", FASTAPI_BASIC_MAIN)],
    );
    Ok((template, manifest))
}
