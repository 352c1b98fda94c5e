mod generation;
mod reflect;

pub use generation::{build_generation_request, GenerationOutcome, GenerationRequest};
pub use reflect::{build_reflect_command, ReflectCommand, ReflectIdentifier, ReflectOutcome};
