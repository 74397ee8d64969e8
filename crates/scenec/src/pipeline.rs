//! Fetch, compile, optimize and export in one run.

use crate::collab::{DocumentRetriever, ExportArtifact, Exporter, Optimizer};
use crate::error::PipelineError;
use crate::options::CompileOptions;
use crate::url::{extract_file_key, extract_node_id};
use crate::{compile_with_options, CompiledOutput};
use scenec_core::Diagnostic;

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub output: CompiledOutput,
    /// Present when an exporter is configured
    pub artifact: Option<ExportArtifact>,
}

/// Wires collaborators around the compiler.
///
/// Retrieval and export failures are returned as-is. Optimizer failures keep
/// the compiler's output and add an info diagnostic. Nothing is retried.
pub struct Pipeline {
    retriever: Box<dyn DocumentRetriever>,
    optimizer: Option<Box<dyn Optimizer>>,
    exporter: Option<Box<dyn Exporter>>,
    options: CompileOptions,
}

impl Pipeline {
    pub fn new(retriever: impl DocumentRetriever + 'static) -> Self {
        Self {
            retriever: Box::new(retriever),
            optimizer: None,
            exporter: None,
            options: CompileOptions::default(),
        }
    }

    pub fn with_optimizer(mut self, optimizer: impl Optimizer + 'static) -> Self {
        self.optimizer = Some(Box::new(optimizer));
        self
    }

    pub fn with_exporter(mut self, exporter: impl Exporter + 'static) -> Self {
        self.exporter = Some(Box::new(exporter));
        self
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Run for a design-file URL; a `node-id` in the URL selects the subtree
    /// unless the options already name one.
    pub fn run_url(&self, url: &str) -> Result<PipelineOutput, PipelineError> {
        let file_key =
            extract_file_key(url).ok_or_else(|| PipelineError::InvalidUrl(url.to_string()))?;
        let mut options = self.options.clone();
        if options.root_node.is_none() {
            options.root_node = extract_node_id(url);
        }
        self.run_with(file_key, &options)
    }

    /// Run for a file key.
    pub fn run(&self, file_key: &str) -> Result<PipelineOutput, PipelineError> {
        self.run_with(file_key, &self.options)
    }

    fn run_with(
        &self,
        file_key: &str,
        options: &CompileOptions,
    ) -> Result<PipelineOutput, PipelineError> {
        let raw = self.retriever.fetch(file_key)?;
        tracing::debug!(file_key, bytes = raw.len(), "fetched document");

        let mut output = compile_with_options(&raw, options)?;

        if let Some(optimizer) = &self.optimizer {
            match optimizer.improve(&output.markup, &output.stylesheet) {
                Ok(refined) => {
                    output.markup = refined.markup;
                    output.stylesheet = refined.stylesheet;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "optimizer failed, keeping compiler output");
                    output.diagnostics.push(Diagnostic::info(
                        None,
                        format!("optimization skipped: {}", err),
                    ));
                }
            }
        }

        let artifact = match &self.exporter {
            Some(exporter) => Some(exporter.package(
                &output.markup,
                &output.stylesheet,
                &options.component_name,
            )?),
            None => None,
        };

        Ok(PipelineOutput { output, artifact })
    }
}
