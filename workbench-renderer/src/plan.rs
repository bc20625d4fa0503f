//! Manifest-driven scaffold planning — [`ScaffoldPlanner`].
//!
//! The planner sits above the plain [`Renderer`] and applies the manifest's
//! logic to a template: parameter resolution with defaults, templated file
//! names, conditional file skipping, and post-scaffold rules. The result is
//! a [`ScaffoldPlan`] describing everything the external writer/executor
//! should do — the planner itself touches neither the filesystem nor a
//! shell.
//!
//! Unlike [`Renderer::render`], the planned file list is *not* isomorphic to
//! the template: a manifest entry whose templated path renders to
//! whitespace-only is dropped, and a stray top-level `template.json` is
//! never emitted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use workbench_core::condition::Condition;
use workbench_core::manifest::{CommandRule, TemplateManifest};
use workbench_core::params::ParameterResolver;
use workbench_core::types::{RenderedFile, RenderedOutput, Template, Value, VariableName};

use crate::engine::Renderer;
use crate::error::PlanError;

/// Everything the external collaborators need to materialise a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldPlan {
    /// Files to write, in template order.
    pub files: RenderedOutput,
    /// Relative paths whose deletion conditions held.
    pub deletions: Vec<PathBuf>,
    /// Commands whose conditions held, in manifest order.
    pub commands: Vec<CommandRule>,
}

/// Plans a scaffold for one manifest.
#[derive(Debug)]
pub struct ScaffoldPlanner<'m> {
    manifest: &'m TemplateManifest,
    renderer: Renderer,
}

impl<'m> ScaffoldPlanner<'m> {
    pub fn new(manifest: &'m TemplateManifest) -> Self {
        Self { manifest, renderer: Renderer::new() }
    }

    /// Build the full plan for `template` from collected parameter values.
    ///
    /// Values are validated against the manifest, defaults of visible
    /// parameters fill the gaps, and the resulting variable set drives both
    /// path and content rendering.
    pub fn plan<I, N>(&self, template: &Template, values: I) -> Result<ScaffoldPlan, PlanError>
    where
        I: IntoIterator<Item = (N, Value)>,
        N: Into<VariableName>,
    {
        let resolver = ParameterResolver::with_values(self.manifest, values)?;
        let vars = resolver.resolve()?;
        let effective = resolver.effective_values();

        let mut files = Vec::with_capacity(template.len());
        for entry in template.files() {
            if entry.path == Path::new("template.json") {
                continue;
            }
            let path = self.renderer.render_path(&entry.path, &vars)?;
            // A name that renders to nothing means "skip this file".
            if path.to_string_lossy().trim().is_empty() {
                continue;
            }
            let content = crate::scanner::substitute(&entry.path, &entry.content, &vars)?;
            files.push(RenderedFile { path, content });
        }

        let mut deletions = Vec::new();
        if let Some(post) = &self.manifest.post_scaffold {
            for rule in &post.files_to_delete {
                let condition = Condition::parse(&rule.condition)?;
                if condition.evaluate(&effective) {
                    deletions.push(PathBuf::from(&rule.path));
                }
            }
        }

        let mut commands = Vec::new();
        if let Some(post) = &self.manifest.post_scaffold {
            for rule in &post.commands {
                if rule.command.trim().is_empty() {
                    continue;
                }
                let keep = match &rule.condition {
                    None => true,
                    // An unparseable command condition skips the command
                    // rather than failing the plan.
                    Some(raw) => match Condition::parse(raw) {
                        Ok(condition) => condition.evaluate(&effective),
                        Err(_) => false,
                    },
                };
                if keep {
                    commands.push(rule.clone());
                }
            }
        }

        Ok(ScaffoldPlan { files: RenderedOutput::new(files), deletions, commands })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use workbench_core::types::TemplateFile;

    fn manifest() -> TemplateManifest {
        TemplateManifest::from_json(
            r#"{
                "name": "web-service",
                "description": "Web service starter.",
                "parameters": [
                    {
                        "name": "ProjectName",
                        "prompt": "Name?",
                        "type": "string",
                        "required": true
                    },
                    {
                        "name": "IncludeTesting",
                        "prompt": "Tests?",
                        "type": "boolean",
                        "default": false
                    },
                    {
                        "name": "TestDirName",
                        "prompt": "Test dir?",
                        "type": "string",
                        "default": ""
                    }
                ],
                "postScaffold": {
                    "filesToDelete": [
                        { "path": "tests", "condition": "IncludeTesting == false" }
                    ],
                    "commands": [
                        { "command": "git init", "description": "Initialise git" },
                        {
                            "command": "npm test",
                            "description": "Run tests once",
                            "condition": "IncludeTesting == true"
                        },
                        { "command": "   ", "description": "blank, always dropped" }
                    ]
                }
            }"#,
        )
        .expect("fixture manifest parses")
    }

    fn template() -> Template {
        Template::new(
            "web-service",
            vec![
                TemplateFile::new("template.json", "{ \"never\": \"emitted\" }"),
                TemplateFile::new("README.md", "# {{.ProjectName}}\n"),
                TemplateFile::new("{{.ProjectName}}.cfg", "name={{.ProjectName}}\n"),
                TemplateFile::new("{{.TestDirName}}", "placeholder\n"),
            ],
        )
    }

    #[test]
    fn plan_renders_paths_and_contents() {
        let m = manifest();
        let plan = ScaffoldPlanner::new(&m)
            .plan(&template(), [("ProjectName", Value::from("atlas"))])
            .expect("plan");
        let paths = plan.files.paths();
        assert_eq!(paths, [&PathBuf::from("README.md"), &PathBuf::from("atlas.cfg")]);
        assert_eq!(plan.files.files()[0].content, "# atlas\n");
        assert_eq!(plan.files.files()[1].content, "name=atlas\n");
    }

    #[test]
    fn empty_rendered_path_skips_the_file() {
        let m = manifest();
        let plan = ScaffoldPlanner::new(&m)
            .plan(&template(), [("ProjectName", Value::from("atlas"))])
            .unwrap();
        assert!(plan.files.paths().iter().all(|p| !p.to_string_lossy().is_empty()));
    }

    #[test]
    fn manifest_file_is_never_emitted() {
        let m = manifest();
        let plan = ScaffoldPlanner::new(&m)
            .plan(&template(), [("ProjectName", Value::from("atlas"))])
            .unwrap();
        assert!(!plan.files.paths().contains(&&PathBuf::from("template.json")));
    }

    #[test]
    fn deletion_fires_when_condition_holds() {
        let m = manifest();
        let plan = ScaffoldPlanner::new(&m)
            .plan(&template(), [("ProjectName", Value::from("atlas"))])
            .unwrap();
        // IncludeTesting defaults to false, so the tests dir goes.
        assert_eq!(plan.deletions, [PathBuf::from("tests")]);
    }

    #[test]
    fn deletion_suppressed_when_condition_fails() {
        let m = manifest();
        let plan = ScaffoldPlanner::new(&m)
            .plan(
                &template(),
                [
                    ("ProjectName", Value::from("atlas")),
                    ("IncludeTesting", Value::Bool(true)),
                ],
            )
            .unwrap();
        assert!(plan.deletions.is_empty());
    }

    #[test]
    fn conditional_and_blank_commands_filtered() {
        let m = manifest();
        let plan = ScaffoldPlanner::new(&m)
            .plan(&template(), [("ProjectName", Value::from("atlas"))])
            .unwrap();
        let commands: Vec<_> = plan.commands.iter().map(|c| c.command.as_str()).collect();
        assert_eq!(commands, ["git init"]);

        let plan = ScaffoldPlanner::new(&m)
            .plan(
                &template(),
                [
                    ("ProjectName", Value::from("atlas")),
                    ("IncludeTesting", Value::Bool(true)),
                ],
            )
            .unwrap();
        let commands: Vec<_> = plan.commands.iter().map(|c| c.command.as_str()).collect();
        assert_eq!(commands, ["git init", "npm test"]);
    }

    #[test]
    fn plan_fails_on_missing_required_value() {
        let m = manifest();
        let err = ScaffoldPlanner::new(&m)
            .plan(&template(), Vec::<(&str, Value)>::new())
            .expect_err("ProjectName required");
        assert!(matches!(err, PlanError::Parameter(_)));
    }

    #[test]
    fn plan_serializes_for_the_external_writer() {
        let m = manifest();
        let plan = ScaffoldPlanner::new(&m)
            .plan(&template(), [("ProjectName", Value::from("atlas"))])
            .unwrap();
        let json = serde_json::to_string(&plan).expect("serialize");
        let back: ScaffoldPlan = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(plan, back);
    }

    #[test]
    fn plan_fails_on_invalid_value() {
        let m = manifest();
        let err = ScaffoldPlanner::new(&m)
            .plan(&template(), [("IncludeTesting", Value::from("yes"))])
            .expect_err("type mismatch");
        assert!(matches!(err, PlanError::Parameter(_)));
    }
}
