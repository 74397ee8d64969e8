//! Markup and stylesheet emission for scenec.
//!
//! Takes the walk order and the resolver's records and produces a markup
//! tree plus a deduplicated class stylesheet. Identical records share one
//! class; names come from the node names that first used them.
//!
//! # Example
//!
//! ```ignore
//! use scenec_codegen::{CodeEmitter, EmitOptions, MarkupFlavor};
//!
//! let emission = CodeEmitter::new(EmitOptions::default())?.emit(&entries, &resolution.nodes)?;
//! println!("{}", emission.markup.render(MarkupFlavor::Jsx));
//! println!("{}", emission.stylesheet.to_css());
//! ```

mod emitter;
pub mod error;
mod markup;
mod naming;
mod stylesheet;
mod templates;

pub use emitter::{CodeEmitter, EmitOptions, Emission};
pub use error::{CodegenError, Result};
pub use markup::{escape_attribute, escape_text, Element, Markup, MarkupFlavor, MarkupNode};
pub use naming::ClassNamer;
pub use stylesheet::{StyleRule, Stylesheet};
pub use templates::{render_component_module, render_html_document, TemplateEngine};
