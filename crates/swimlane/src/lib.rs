//! Swimlane - compiles structural process models into BPMN 2.0 documents.
//!
//! A structural model describes pools, lanes, components and flows placed on
//! a raw grid, typically as JSON produced by a generative assistant. This
//! crate turns it into a BPMN 2.0 interchange document that diagram editors
//! can open: the logical process and collaboration elements plus a diagram
//! with shape bounds and routed connector waypoints.
//!
//! Problems with individual elements never abort a compile. They are left
//! out of the document and reported as [`Diagnostic`]s next to the XML.

pub mod config;
pub mod diagnostic;
pub mod layout;
pub mod normalize;
pub mod routing;
pub mod xml;

mod diagram;
mod error;
mod export;
mod logical;
mod structure;

pub use swimlane_core::{category, edit, geometry, identifier, model};

pub use error::CompileError;

use log::{debug, info, trace};

use swimlane_core::{
    edit::EditScript,
    model::{StructuralModel, extract_json},
};

use config::AppConfig;
use diagnostic::{Diagnostic, DiagnosticCollector};
use layout::ShapeResolver;
use structure::Structure;

/// The result of a successful compile.
#[derive(Debug, Clone)]
pub struct Compilation {
    xml: String,
    diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    /// The serialized BPMN document.
    pub fn xml(&self) -> &str {
        &self.xml
    }

    /// Elements that were left out of the document, in the order found.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_xml(self) -> String {
        self.xml
    }
}

/// Compiler from structural models to BPMN XML.
///
/// # Examples
///
/// ```
/// use swimlane::{Compiler, config::AppConfig};
///
/// let source = r#"{"Pools": [{"ID": "Pool_1", "Name": "Customer", "Lanes": [{
///     "ID": "Lane_1", "Name": "",
///     "Components": [
///         {"Type": "startEvent", "ID": "Start_1", "Outgoing": ["Flow_1"], "x": 0, "y": 0},
///         {"Type": "endEvent", "ID": "End_1", "Incoming": ["Flow_1"], "x": 300, "y": 0}
///     ],
///     "Flows": [{"ID": "Flow_1", "Type": "sequenceFlow", "Start": "Start_1", "Target": "End_1"}]
/// }]}]}"#;
///
/// let compiler = Compiler::new(AppConfig::default());
/// let model = compiler.parse(source).expect("valid model");
/// let compilation = compiler.compile(&model).expect("compiles");
///
/// assert!(compilation.xml().contains("<bpmndi:BPMNEdge"));
/// assert!(compilation.diagnostics().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Compiler {
    config: AppConfig,
}

impl Compiler {
    /// Create a new compiler with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Layout, id generation and output settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a structural model from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Model`] carrying the source text when the JSON
    /// is malformed or a required field is missing.
    pub fn parse(&self, source: &str) -> Result<StructuralModel, CompileError> {
        info!("Parsing structural model");
        let model = StructuralModel::from_json(source)
            .map_err(|err| CompileError::new_model_error(err, source))?;
        trace!(model:?; "Parsed model");
        Ok(model)
    }

    /// Parse a structural model out of a free-text assistant reply.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Model`] when the reply contains no JSON object
    /// or the object is not a valid model. The error's source is the
    /// extracted object, which is what its line and column refer to.
    pub fn parse_reply(&self, reply: &str) -> Result<StructuralModel, CompileError> {
        info!("Extracting structural model from reply");
        let model = StructuralModel::from_reply(reply).map_err(|err| {
            let src = extract_json(reply).unwrap_or(reply);
            CompileError::new_model_error(err, src)
        })?;
        trace!(model:?; "Parsed model");
        Ok(model)
    }

    /// Apply a JSON edit script to `model`, returning the edited copy.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Edit`] if the script is malformed or targets
    /// an element that does not exist.
    pub fn apply_edits(
        &self,
        model: &StructuralModel,
        script: &str,
    ) -> Result<StructuralModel, CompileError> {
        let script = EditScript::from_json(script)?;
        info!(instructions = script.instructions().len(); "Applying edit script");
        Ok(script.apply(model)?)
    }

    /// Compile a structural model into a BPMN document.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::EmptyModel`] if the model has no pools, or
    /// [`CompileError::Export`] if serialization fails.
    pub fn compile(&self, model: &StructuralModel) -> Result<Compilation, CompileError> {
        if model.is_empty() {
            return Err(CompileError::EmptyModel);
        }
        info!(pools = model.pools().len(); "Compiling structural model");

        let mut diagnostics = DiagnosticCollector::new();
        let mut ids = self.config.ids().generator();

        let structure = Structure::build(model, &mut diagnostics);
        let logical = logical::build_logical(&structure, ids.as_mut());
        debug!("Logical tree built");

        let pools = ShapeResolver::new(self.config.layout()).resolve(&structure);
        let diagram = diagram::build_diagram(
            &structure,
            &pools,
            &logical.collaboration_id,
            ids.as_mut(),
            &mut diagnostics,
        );

        let root = normalize::normalize(logical.root.with_child(diagram));
        trace!(root:?; "Normalized document tree");

        let xml = export::to_xml(&root, self.config.output().indent())?;
        let diagnostics = diagnostics.finish();

        info!(
            bytes = xml.len(),
            diagnostics = diagnostics.len();
            "BPMN document compiled"
        );
        Ok(Compilation { xml, diagnostics })
    }

    /// Parse and compile in one step.
    ///
    /// # Errors
    ///
    /// See [`Compiler::parse`] and [`Compiler::compile`].
    pub fn compile_str(&self, source: &str) -> Result<Compilation, CompileError> {
        let model = self.parse(source)?;
        self.compile(&model)
    }
}
