//! Render scenarios
//!
//! End-to-end renders through `Renderer<MemoryHost>`, checked against the
//! host tree and the operation log.

use std::cell::RefCell;
use std::rc::Rc;

use rstest::*;
use spark_vdom::{
    create_element, create_text_vnode, props, Children, Host, HostOp, MemoryHost, NodeId, OpKind, PropValue,
    RenderConfig, Renderer, VNode,
};

// ============================================================================
// Fixtures
// ============================================================================

struct Fixture {
    renderer: Renderer<MemoryHost>,
    root: NodeId,
}

impl Fixture {
    fn render(&mut self, vnode: VNode) {
        self.renderer.render(vnode, self.root).unwrap();
    }

    fn host(&self) -> &MemoryHost {
        self.renderer.host()
    }

    fn clear_ops(&mut self) {
        self.renderer.host_mut().clear_ops();
    }

    fn baseline(&self) -> &VNode {
        self.renderer.baseline(self.root).unwrap()
    }

    /// Host handles of the baseline root's children, in vnode order.
    fn child_handles(&self) -> Vec<NodeId> {
        self.baseline()
            .children()
            .nodes()
            .iter()
            .filter_map(VNode::el)
            .collect()
    }
}

#[fixture]
fn fx() -> Fixture {
    let mut renderer = Renderer::new(MemoryHost::new());
    let root = renderer.host_mut().create_container();
    Fixture { renderer, root }
}

fn p(key: i64, text: &str) -> VNode {
    create_element("p", Some(props! { "key" => key }), text).unwrap()
}

fn keyed_div(keys: &[i64]) -> VNode {
    let children = keys.iter().map(|&k| p(k, &format!("text{k}"))).collect::<Vec<_>>();
    create_element("div", Some(props! { "id" => "box" }), children).unwrap()
}

/// The two trees of the keyed list demo.
fn scenario_trees(log: Rc<RefCell<Vec<&'static str>>>) -> (VNode, VNode) {
    let first = log.clone();
    let second = log;

    let vdom1 = create_element(
        "div",
        Some(props! { "id" => "box" }),
        vec![
            create_element(
                "p",
                Some(props! { "key" => 1, "style" => PropValue::style([("color", "red")]) }),
                "text1",
            )
            .unwrap(),
            create_element("p", Some(props! { "key" => 2, "class" => "item" }), "text2").unwrap(),
            create_element(
                "p",
                Some(props! {
                    "key" => 3,
                    "@click" => PropValue::handler(move |_| first.borrow_mut().push("haha")),
                }),
                "text3",
            )
            .unwrap(),
            create_element("p", Some(props! { "key" => 4 }), "text4").unwrap(),
        ],
    )
    .unwrap();

    let vdom2 = create_element(
        "div",
        Some(props! { "id" => "box" }),
        vec![
            create_element("p", Some(props! { "key" => 2, "class" => "item" }), "text2").unwrap(),
            create_element(
                "p",
                Some(props! {
                    "key" => 3,
                    "@click" => PropValue::handler(move |_| second.borrow_mut().push("333")),
                }),
                "text3",
            )
            .unwrap(),
            create_element("p", Some(props! { "key" => 4 }), "text4").unwrap(),
            create_element(
                "p",
                Some(props! { "key" => 1, "style" => PropValue::style([("color", "green")]) }),
                "text1",
            )
            .unwrap(),
            create_element("p", Some(props! { "key" => 5, "class" => "item-2" }), "text5").unwrap(),
        ],
    )
    .unwrap();

    (vdom1, vdom2)
}

/// Insertions and removals under `parent`, skipping those inside new subtrees.
fn structural_ops(host: &MemoryHost, parent: NodeId) -> Vec<&HostOp> {
    host.ops_matching(OpKind::INSERT | OpKind::REMOVE)
        .into_iter()
        .filter(|op| match op {
            HostOp::Append { parent: p, .. }
            | HostOp::InsertBefore { parent: p, .. }
            | HostOp::Remove { parent: p, .. } => *p == parent,
            _ => false,
        })
        .collect()
}

// ============================================================================
// Mount fidelity
// ============================================================================

#[rstest]
fn test_mount_fidelity(mut fx: Fixture) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (vdom1, _) = scenario_trees(log);
    fx.render(vdom1);

    assert_eq!(
        fx.host().inner_markup(fx.root),
        concat!(
            "<div id=\"box\">",
            "<p key=\"1\" style=\"color: red;\">text1</p>",
            "<p key=\"2\" class=\"item\">text2</p>",
            "<p key=\"3\">text3</p>",
            "<p key=\"4\">text4</p>",
            "</div>"
        )
    );

    let div = fx.baseline().el().unwrap();
    assert_eq!(fx.host().tag(div), Some("div"));
    assert_eq!(fx.host().children(div), fx.child_handles().as_slice());
    for (handle, vnode) in fx.child_handles().iter().zip(fx.baseline().children().nodes()) {
        assert_eq!(fx.host().tag(*handle), vnode.tag_name());
        assert_eq!(fx.host().text_content(*handle), vnode.children().nodes()[0].text().unwrap());
    }
}

// ============================================================================
// Idempotence
// ============================================================================

#[rstest]
#[case::text(create_text_vnode("plain"))]
#[case::keyed(keyed_div(&[3, 1, 2]))]
#[case::nan_attribute(create_element("p", Some(props! { "data-x" => f64::NAN }), ()).unwrap())]
#[case::styled(create_element(
    "p",
    Some(props! { "style" => PropValue::style([("color", "red")]), "class" => "a", "title" => 0 }),
    vec![create_text_vnode("x"), create_element("br", None, ()).unwrap()],
).unwrap())]
fn test_rerender_same_tree_is_silent(mut fx: Fixture, #[case] tree: VNode) {
    fx.render(tree.clone());
    fx.clear_ops();

    fx.render(tree);
    assert!(fx.host().ops().is_empty(), "unexpected ops: {:?}", fx.host().ops());
}

#[rstest]
fn test_rerender_with_same_handler_is_silent(mut fx: Fixture) {
    let handler = PropValue::handler(|_| {});
    let tree = create_element("button", Some(props! { "@click" => handler }), "go").unwrap();
    fx.render(tree.clone());
    fx.clear_ops();

    fx.render(tree);
    assert_eq!(fx.host().count_ops(OpKind::LISTENER), 0);
}

// ============================================================================
// Keyed diff
// ============================================================================

#[rstest]
fn test_keyed_stability(mut fx: Fixture) {
    fx.render(keyed_div(&[1, 2, 3]));
    let [a, b, c] = fx.child_handles()[..] else { panic!("three children") };
    fx.clear_ops();

    fx.render(keyed_div(&[2, 1, 3]));

    assert_eq!(fx.child_handles(), vec![b, a, c]);
    let div = fx.baseline().el().unwrap();
    assert_eq!(fx.host().children(div), &[b, a, c]);
    assert_eq!(fx.host().count_ops(OpKind::CREATE | OpKind::REMOVE), 0);
}

#[rstest]
fn test_scenario(mut fx: Fixture) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (vdom1, vdom2) = scenario_trees(log.clone());

    fx.render(vdom1);
    let [p1, p2, p3, p4] = fx.child_handles()[..] else { panic!("four children") };
    fx.clear_ops();

    fx.render(vdom2);

    assert_eq!(
        fx.host().inner_markup(fx.root),
        concat!(
            "<div id=\"box\">",
            "<p key=\"2\" class=\"item\">text2</p>",
            "<p key=\"3\">text3</p>",
            "<p key=\"4\">text4</p>",
            "<p key=\"1\" style=\"color: green;\">text1</p>",
            "<p key=\"5\" class=\"item-2\">text5</p>",
            "</div>"
        )
    );

    let handles = fx.child_handles();
    assert_eq!(&handles[..4], &[p2, p3, p4, p1]);
    let p5 = handles[4];

    let div = fx.baseline().el().unwrap();
    let structural = structural_ops(fx.host(), div);
    assert_eq!(
        structural,
        vec![
            &HostOp::InsertBefore { parent: div, child: p1, reference: None },
            &HostOp::Append { parent: div, child: p5 },
        ]
    );
    for untouched in [p2, p4] {
        assert!(fx.host().ops().iter().all(|op| op.subject() != untouched));
    }

    // Handler swapped on p3 only.
    let p3_ops: Vec<&HostOp> = fx.host().ops().iter().filter(|op| op.subject() == p3).collect();
    assert_eq!(
        p3_ops,
        vec![
            &HostOp::RemoveListener { node: p3, event_type: "click".into() },
            &HostOp::AddListener { node: p3, event_type: "click".into() },
        ]
    );
    fx.host().dispatch(p3, "click");
    assert_eq!(*log.borrow(), vec!["333"]);
}

#[rstest]
fn test_pure_removal(mut fx: Fixture) {
    fx.render(keyed_div(&[1, 2, 3]));
    let [a, b, c] = fx.child_handles()[..] else { panic!("three children") };
    let div = fx.baseline().el().unwrap();
    fx.clear_ops();

    fx.render(keyed_div(&[1, 3]));

    assert_eq!(fx.host().ops(), &[HostOp::Remove { parent: div, child: b }]);
    assert_eq!(fx.host().children(div), &[a, c]);
}

#[rstest]
fn test_custom_key_prop() {
    let config = RenderConfig::new().with_key_prop("data-id");
    let mut renderer = Renderer::with_config(MemoryHost::new(), config);
    let root = renderer.host_mut().create_container();
    let row = |id: &str| create_element("li", Some(props! { "data-id" => id }), id).unwrap();
    let ul_children = |r: &Renderer<MemoryHost>| {
        let ul = r.baseline(root).and_then(VNode::el).unwrap();
        r.host().children(ul).to_vec()
    };

    renderer.render(create_element("ul", None, vec![row("x"), row("y")]).unwrap(), root).unwrap();
    let before = ul_children(&renderer);
    renderer.host_mut().clear_ops();

    renderer.render(create_element("ul", None, vec![row("y"), row("x")]).unwrap(), root).unwrap();
    assert_eq!(ul_children(&renderer), vec![before[1], before[0]]);
    assert_eq!(renderer.host().count_ops(OpKind::CREATE), 0);
}

// ============================================================================
// Props
// ============================================================================

#[rstest]
fn test_style_merge(mut fx: Fixture) {
    fx.render(create_element("p", Some(props! { "style" => PropValue::style([("color", "red")]) }), ()).unwrap());
    let el = fx.baseline().el().unwrap();
    fx.renderer.host_mut().set_style_property(el, "margin", "4px");

    fx.render(create_element("p", Some(props! { "style" => PropValue::style(Vec::<(&str, &str)>::new()) }), ()).unwrap());

    assert_eq!(fx.host().style(el, "color"), None);
    assert_eq!(fx.host().style(el, "margin"), Some("4px"));
}

#[rstest]
fn test_props_removed_on_rerender(mut fx: Fixture) {
    fx.render(create_element("a", Some(props! { "href" => "/", "class" => "nav", "@click" => PropValue::handler(|_| {}) }), "home").unwrap());
    let el = fx.baseline().el().unwrap();

    fx.render(create_element("a", None, "home").unwrap());

    assert_eq!(fx.host().to_markup(el), "<a>home</a>");
    assert_eq!(fx.host().listener_count(el, "click"), 0);
}

// ============================================================================
// Replacement and arity
// ============================================================================

#[rstest]
#[case::text_to_html(create_text_vnode("t"), create_element("b", None, "t").unwrap())]
#[case::html_to_text(create_element("b", None, "t").unwrap(), create_text_vnode("t"))]
#[case::tag_change(create_element("b", None, "t").unwrap(), create_element("i", None, "t").unwrap())]
fn test_type_change_replaces(mut fx: Fixture, #[case] prev: VNode, #[case] next: VNode) {
    let wrap = |middle: VNode| {
        create_element("div", None, vec![create_text_vnode("a"), middle, create_text_vnode("z")]).unwrap()
    };
    fx.render(wrap(prev));
    let old = fx.child_handles()[1];
    fx.clear_ops();

    fx.render(wrap(next.clone()));

    let new = fx.child_handles()[1];
    assert_ne!(old, new);
    assert_eq!(fx.host().count_ops(OpKind::REMOVE), 1);
    assert_eq!(fx.host().count_ops(OpKind::TEXT | OpKind::PROPS), 0);
    assert_eq!(fx.host().ops()[0].kind(), OpKind::REMOVE);

    let expected = match next.tag_name() {
        Some(tag) => format!("<div>a<{tag}>t</{tag}>z</div>"),
        None => "<div>atz</div>".to_string(),
    };
    assert_eq!(fx.host().inner_markup(fx.root), expected);
}

#[rstest]
#[case::empty_to_text(Children::None, Children::from("t"), "<p>t</p>")]
#[case::text_to_empty(Children::from("t"), Children::None, "<p></p>")]
#[case::text_to_text(Children::from("a"), Children::from("b"), "<p>b</p>")]
fn test_text_children(
    mut fx: Fixture,
    #[case] prev: Children,
    #[case] next: Children,
    #[case] markup: &str,
) {
    fx.render(create_element("p", None, prev).unwrap());
    fx.render(create_element("p", None, next).unwrap());
    assert_eq!(fx.host().inner_markup(fx.root), markup);
}

#[rstest]
fn test_single_to_multi_and_back(mut fx: Fixture) {
    fx.render(create_element("ul", None, create_element("li", None, "only").unwrap()).unwrap());
    fx.render(keyed_div(&[1, 2]));
    assert_eq!(
        fx.host().inner_markup(fx.root),
        "<div id=\"box\"><p key=\"1\">text1</p><p key=\"2\">text2</p></div>"
    );

    fx.render(create_element("div", Some(props! { "id" => "box" }), p(2, "solo")).unwrap());
    assert_eq!(
        fx.host().inner_markup(fx.root),
        "<div id=\"box\"><p key=\"2\">solo</p></div>"
    );
}
