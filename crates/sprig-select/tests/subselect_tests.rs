//! Integration tests for `:is()`, `:not()`, `:has()` and the built-in
//! aliases.

use sprig_dom::{DomTree, ElementData, NodeId};
use sprig_select::token::build::{
    adjacent, attr_exists, child, descendant, pseudo, pseudo_sub, sibling, tag, universal,
};
use sprig_select::token::SelectorList;
use sprig_select::{Flags, MatchContext, Options, compile, select_all};

struct Form {
    tree: DomTree,
    form: NodeId,
    checkbox: NodeId,
    radio: NodeId,
    text: NodeId,
    untyped: NodeId,
    button: NodeId,
    single: NodeId,
    first_option: NodeId,
    multiple: NodeId,
    fieldset: NodeId,
    legend_input: NodeId,
    field_input: NodeId,
    link: NodeId,
    anchor: NodeId,
    heading: NodeId,
}

/// ```text
/// <form>
///   <input type=checkbox checked> <input type=radio> <input type=text required> <input>
///   <button disabled>
///   <select><option><option></select>
///   <select multiple><option></select>
///   <fieldset disabled><legend><input></legend><input></fieldset>
///   <a href=x> <a> <h3>
/// </form>
/// ```
fn form() -> Form {
    let mut tree = DomTree::new();
    let form = tree.append_element(NodeId::ROOT, ElementData::new("form"));
    let checkbox = tree.append_element(
        form,
        ElementData::new("input").with_attr("type", "checkbox").with_attr("checked", ""),
    );
    let radio = tree.append_element(form, ElementData::new("input").with_attr("type", "radio"));
    let text = tree.append_element(
        form,
        ElementData::new("input").with_attr("type", "text").with_attr("required", ""),
    );
    let untyped = tree.append_element(form, ElementData::new("input"));
    let button = tree.append_element(form, ElementData::new("button").with_attr("disabled", ""));

    let single = tree.append_element(form, ElementData::new("select"));
    let first_option = tree.append_element(single, ElementData::new("option"));
    let _ = tree.append_element(single, ElementData::new("option"));
    let multiple = tree.append_element(form, ElementData::new("select").with_attr("multiple", ""));
    let _ = tree.append_element(multiple, ElementData::new("option"));

    let fieldset = tree.append_element(form, ElementData::new("fieldset").with_attr("disabled", ""));
    let legend = tree.append_element(fieldset, ElementData::new("legend"));
    let legend_input = tree.append_element(legend, ElementData::new("input"));
    let field_input = tree.append_element(fieldset, ElementData::new("input"));

    let link = tree.append_element(form, ElementData::new("a").with_attr("href", "x"));
    let anchor = tree.append_element(form, ElementData::new("a"));
    let heading = tree.append_element(form, ElementData::new("h3"));

    Form {
        tree,
        form,
        checkbox,
        radio,
        text,
        untyped,
        button,
        single,
        first_option,
        multiple,
        fieldset,
        legend_input,
        field_input,
        link,
        anchor,
        heading,
    }
}

fn select(form: &Form, selectors: &SelectorList) -> Vec<NodeId> {
    select_all(selectors, &MatchContext::Node(NodeId::ROOT), &Options::new(&form.tree)).unwrap()
}

fn alias(form: &Form, name: &str) -> Vec<NodeId> {
    select(form, &vec![vec![pseudo(name)]])
}

#[test]
fn test_is_where_matches() {
    let f = form();
    for name in ["is", "where", "matches"] {
        let selectors = vec![vec![pseudo_sub(name, vec![vec![tag("h3")], vec![tag("button")]])]];
        assert_eq!(select(&f, &selectors), vec![f.button, f.heading], ":{name}");
    }
}

#[test]
fn test_not() {
    let f = form();
    // form > :not(input, select)
    let selectors = vec![vec![
        tag("form"),
        child(),
        pseudo_sub("not", vec![vec![tag("input")], vec![tag("select")]]),
    ]];
    assert_eq!(
        select(&f, &selectors),
        vec![f.button, f.fieldset, f.link, f.anchor, f.heading]
    );
}

#[test]
fn test_subselect_sentinels() {
    let f = form();
    let options = Options::new(&f.tree);
    let compiled = |token| compile(&vec![vec![tag("a"), token]], &options, None).unwrap();

    // :not(*) can never match; :not(:hover) always does on a tree without hover support.
    assert!(compiled(pseudo_sub("not", vec![vec![universal()]])).predicate.is_always_false());
    assert!(compiled(pseudo_sub("is", vec![vec![pseudo("hover")]])).predicate.is_always_false());
    let not_hover = compiled(pseudo_sub("not", vec![vec![pseudo("hover")]]));
    assert!(not_hover.matches(&f.link));
    assert!(!not_hover.matches(&f.heading));
}

#[test]
fn test_has_descendant() {
    let f = form();
    // :has(option)
    let selectors = vec![vec![pseudo_sub("has", vec![vec![tag("option")]])]];
    assert_eq!(select(&f, &selectors), vec![f.form, f.single, f.multiple]);
}

#[test]
fn test_has_child() {
    let f = form();
    // :has(> legend)
    let selectors = vec![vec![pseudo_sub("has", vec![vec![child(), tag("legend")]])]];
    assert_eq!(select(&f, &selectors), vec![f.fieldset]);
}

#[test]
fn test_has_adjacent_sibling() {
    let f = form();
    // :has(+ select)
    let selectors = vec![vec![pseudo_sub("has", vec![vec![adjacent(), tag("select")]])]];
    assert_eq!(select(&f, &selectors), vec![f.button, f.single]);
}

#[test]
fn test_has_general_sibling() {
    let f = form();
    // a:has(~ h3)
    let selectors = vec![vec![tag("a"), pseudo_sub("has", vec![vec![sibling(), tag("h3")]])]];
    assert_eq!(select(&f, &selectors), vec![f.link, f.anchor]);
}

#[test]
fn test_nested_has() {
    let f = form();
    // :has(> :has(> input))
    let inner = pseudo_sub("has", vec![vec![child(), tag("input")]]);
    let selectors = vec![vec![pseudo_sub("has", vec![vec![child(), inner]])]];
    assert_eq!(select(&f, &selectors), vec![f.form, f.fieldset]);
}

#[test]
fn test_relative_has_with_and_without_cache() {
    let f = form();
    // :has(fieldset input)
    let selectors = vec![vec![pseudo_sub(
        "has",
        vec![vec![tag("fieldset"), descendant(), tag("input")]],
    )]];
    let elements: Vec<NodeId> = f.tree.descendants(NodeId::ROOT).collect();

    for cache_results in [true, false] {
        let flags = Flags {
            cache_results,
            ..Flags::default()
        };
        let options = Options::new(&f.tree).with_flags(flags);
        let query = compile(&selectors, &options, None).unwrap();

        // Innermost first: candidates that fail must not decide for the
        // ancestors visited later.
        let matched: Vec<NodeId> = elements
            .iter()
            .rev()
            .copied()
            .filter(|node| query.matches(node))
            .collect();
        assert_eq!(matched, vec![f.form], "cache_results = {cache_results}");
        assert_eq!(
            select_all(&selectors, &MatchContext::Node(NodeId::ROOT), &options).unwrap(),
            vec![f.form]
        );
    }
}

#[test]
fn test_input_type_aliases() {
    let f = form();
    assert_eq!(alias(&f, "checkbox"), vec![f.checkbox]);
    assert_eq!(alias(&f, "radio"), vec![f.radio]);
    assert_eq!(alias(&f, "text"), vec![f.text, f.untyped, f.legend_input, f.field_input]);
    assert!(alias(&f, "password").is_empty());
}

#[test]
fn test_form_state_aliases() {
    let f = form();
    assert_eq!(alias(&f, "checked"), vec![f.checkbox, f.first_option]);
    assert_eq!(alias(&f, "selected"), vec![f.first_option]);
    assert_eq!(alias(&f, "required"), vec![f.text]);
    assert_eq!(
        alias(&f, "optional"),
        vec![
            f.checkbox,
            f.radio,
            f.untyped,
            f.single,
            f.multiple,
            f.legend_input,
            f.field_input
        ]
    );
    assert_eq!(alias(&f, "disabled"), vec![f.button, f.fieldset]);
    // input:enabled
    assert_eq!(
        select(&f, &vec![vec![tag("input"), pseudo("enabled")]]),
        vec![
            f.checkbox,
            f.radio,
            f.text,
            f.untyped,
            f.legend_input,
            f.field_input
        ]
    );
}

#[test]
fn test_element_group_aliases() {
    let f = form();
    assert_eq!(alias(&f, "header"), vec![f.heading]);
    assert_eq!(alias(&f, "button"), vec![f.button]);
    assert_eq!(
        alias(&f, "input"),
        vec![
            f.checkbox,
            f.radio,
            f.text,
            f.untyped,
            f.button,
            f.single,
            f.multiple,
            f.legend_input,
            f.field_input
        ]
    );
    assert_eq!(alias(&f, "any-link"), vec![f.link]);
    assert_eq!(alias(&f, "link"), vec![f.link]);
}

#[test]
fn test_parent_and_position_aliases() {
    let f = form();
    assert_eq!(
        alias(&f, "parent"),
        vec![f.form, f.single, f.multiple, f.fieldset, f.tree.parent(f.legend_input).unwrap()]
    );
    // form > :odd
    let odd = select(&f, &vec![vec![tag("form"), child(), pseudo("odd")]]);
    assert_eq!(odd.first(), Some(&f.checkbox));
    assert_eq!(odd.len(), 6);
    let even = select(&f, &vec![vec![tag("form"), child(), pseudo("even")]]);
    assert_eq!(even.first(), Some(&f.radio));
    assert_eq!(even.len(), 5);
}

#[test]
fn test_alias_respects_surrounding_selector() {
    let f = form();
    // fieldset :input[required]
    let selectors = vec![vec![
        tag("fieldset"),
        descendant(),
        pseudo("input"),
        attr_exists("required"),
    ]];
    assert!(select(&f, &selectors).is_empty());
}
