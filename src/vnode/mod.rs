//! VNode Model - Declarative tree descriptions.
//!
//! - [`create_element`] / [`create_text_vnode`] - build nodes
//! - [`Props`] / [`PropValue`] - ordered attribute, style and event mapping
//! - [`VChildren`] - classified children (Empty / Single / Multi)
//!
//! ```ignore
//! use spark_vdom::{create_element, props};
//!
//! let list = create_element("ul", Some(props! { "id" => "list" }), vec![
//!     create_element("li", Some(props! { "key" => 1 }), "one")?,
//!     create_element("li", Some(props! { "key" => 2 }), "two")?,
//! ])?;
//! ```

mod node;
mod props;

pub use node::*;
pub use props::*;
