//! Keyed List Example - Two renders of a keyed paragraph list
//!
//! This example demonstrates the keyed diff on an in-memory host:
//! - Mounting a `div#box` with four keyed paragraphs
//! - Re-rendering with key 1 moved to the end and key 5 added
//! - Swapping a click handler and changing a style in place
//!
//! Run with: cargo run --example keyed_list
//! Set RUST_LOG=spark_vdom=trace to watch the reconciler decisions.

use std::cell::RefCell;
use std::rc::Rc;

use spark_vdom::{
    create_element, props, HostOp, MemoryHost, PropValue, Renderer, Result, VNode,
};
use tracing_subscriber::EnvFilter;

fn paragraph(props: spark_vdom::Props, text: &str) -> Result<VNode> {
    create_element("p", Some(props), text)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    println!("=== spark-vdom Keyed List Example ===\n");

    let alerts = Rc::new(RefCell::new(Vec::new()));
    let (first, second) = (alerts.clone(), alerts.clone());

    let vdom1 = create_element(
        "div",
        Some(props! { "id" => "box" }),
        vec![
            paragraph(props! { "key" => 1, "style" => PropValue::style([("color", "red")]) }, "text1")?,
            paragraph(props! { "key" => 2, "class" => "item" }, "text2")?,
            paragraph(
                props! { "key" => 3, "@click" => PropValue::handler(move |_| first.borrow_mut().push("haha")) },
                "text3",
            )?,
            paragraph(props! { "key" => 4 }, "text4")?,
        ],
    )?;

    let vdom2 = create_element(
        "div",
        Some(props! { "id" => "box" }),
        vec![
            paragraph(props! { "key" => 2, "class" => "item" }, "text2")?,
            paragraph(
                props! { "key" => 3, "@click" => PropValue::handler(move |_| second.borrow_mut().push("333")) },
                "text3",
            )?,
            paragraph(props! { "key" => 4 }, "text4")?,
            paragraph(props! { "key" => 1, "style" => PropValue::style([("color", "green")]) }, "text1")?,
            paragraph(props! { "key" => 5, "class" => "item-2" }, "text5")?,
        ],
    )?;

    let mut renderer = Renderer::new(MemoryHost::new());
    let app = renderer.host_mut().create_container();

    renderer.render(vdom1, app)?;
    println!("First render ({} ops):", renderer.host().ops().len());
    println!("  {}\n", renderer.host().inner_markup(app));

    renderer.host_mut().clear_ops();
    renderer.render(vdom2, app)?;

    println!("Second render:");
    println!("  {}\n", renderer.host().inner_markup(app));
    println!("Mutations:");
    for op in renderer.host().ops() {
        print_op(op);
    }

    // Click the third paragraph; only the new handler is attached.
    if let Some(p3) = renderer
        .baseline(app)
        .and_then(|div| div.children().nodes().get(1))
        .and_then(VNode::el)
    {
        renderer.host().dispatch(p3, "click");
    }
    println!("\nClick on text3 -> {:?}", alerts.borrow());

    Ok(())
}

fn print_op(op: &HostOp) {
    match op {
        HostOp::CreateElement { node, tag } => println!("  create <{tag}> {node}"),
        HostOp::CreateText { node, text } => println!("  create text {text:?} {node}"),
        HostOp::Append { parent, child } => println!("  append {child} to {parent}"),
        HostOp::InsertBefore { parent, child, reference } => match reference {
            Some(reference) => println!("  move {child} before {reference} in {parent}"),
            None => println!("  move {child} to the end of {parent}"),
        },
        HostOp::Remove { parent, child } => println!("  remove {child} from {parent}"),
        HostOp::SetText { node, text } => println!("  text {node} = {text:?}"),
        HostOp::SetAttribute { node, key, value } => println!("  attr {node} {key}={value:?}"),
        HostOp::RemoveAttribute { node, key } => println!("  attr {node} -{key}"),
        HostOp::SetStyle { node, key, value } => println!("  style {node} {key}: {value}"),
        HostOp::ClearStyle { node, key } => println!("  style {node} -{key}"),
        HostOp::SetClass { node, value } => println!("  class {node} = {value:?}"),
        HostOp::AddListener { node, event_type } => println!("  listen {node} {event_type}"),
        HostOp::RemoveListener { node, event_type } => println!("  unlisten {node} {event_type}"),
    }
}
