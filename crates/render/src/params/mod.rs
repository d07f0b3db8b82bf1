//! Per-program shader parameter binders.

mod chunk;
mod combine;

pub use chunk::ChunkParameters;
pub use combine::CombineParameters;

use std::collections::BTreeMap;

use crate::frame::FrameContext;
use crate::gl::GraphicsApi;
use crate::property::Property;

/// Errors from editing shader parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("unknown shader program: {0}")]
    UnknownProgram(String),
    #[error("program `{program}` has no property `{name}`")]
    UnknownProperty {
        program: &'static str,
        name: String,
    },
    #[error("property `{name}` must be finite, got {value}")]
    NotFinite { name: String, value: f32 },
}

/// Result of applying parameters for one draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Uniforms were pushed; `texture_units` units were bound.
    Applied { texture_units: u32 },
    /// A required texture was missing and nothing was touched.
    Skipped { missing: &'static str },
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Parameters of one shader program.
pub trait ShaderParameters {
    /// Name of the program these parameters feed.
    fn program_name(&self) -> &'static str;

    /// Push uniforms and bind textures for the next draw call.
    fn apply(&self, frame: &FrameContext<'_>, gl: &mut dyn GraphicsApi) -> ApplyOutcome;

    /// Tunable properties, in editor order.
    fn properties(&self) -> &[Property];

    fn properties_mut(&mut self) -> &mut [Property];

    fn property(&self, name: &str) -> Option<&Property> {
        self.properties().iter().find(|p| p.name() == name)
    }

    /// Set a property by name. Returns the stored (clamped) value.
    fn set_property(&mut self, name: &str, value: f32) -> Result<f32, ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NotFinite {
                name: name.to_string(),
                value,
            });
        }
        let program = self.program_name();
        let property = self
            .properties_mut()
            .iter_mut()
            .find(|p| p.name() == name)
            .ok_or_else(|| ParamError::UnknownProperty {
                program,
                name: name.to_string(),
            })?;
        Ok(property.set(value))
    }

    /// Current values keyed by property name.
    fn export_properties(&self) -> BTreeMap<String, f32> {
        self.properties()
            .iter()
            .map(|p| (p.name().to_string(), p.value()))
            .collect()
    }

    /// Apply a set of saved values.
    ///
    /// All names and values are checked first; on error nothing is changed.
    fn import_properties(&mut self, values: &BTreeMap<String, f32>) -> Result<(), ParamError> {
        for (name, value) in values {
            if !value.is_finite() {
                return Err(ParamError::NotFinite {
                    name: name.clone(),
                    value: *value,
                });
            }
            if self.property(name).is_none() {
                return Err(ParamError::UnknownProperty {
                    program: self.program_name(),
                    name: name.clone(),
                });
            }
        }
        for (name, value) in values {
            self.set_property(name, *value)?;
        }
        Ok(())
    }
}

/// Fresh parameters for a program, by name.
pub fn for_program(name: &str) -> Result<Box<dyn ShaderParameters>, ParamError> {
    match name {
        ChunkParameters::PROGRAM => Ok(Box::new(ChunkParameters::new())),
        CombineParameters::PROGRAM => Ok(Box::new(CombineParameters::new())),
        other => Err(ParamError::UnknownProgram(other.to_string())),
    }
}
