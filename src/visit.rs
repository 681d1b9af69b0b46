//! Helper trait for implementing node tree visitors.

use crate::{CellKind, ListKind, Node, TemplateArg};
use std::collections::HashMap;

/// A trait for visiting the nodes of a parsed tree.
///
/// Every hook has a default implementation that descends into children, so
/// a visitor only overrides the variants it cares about. Traversal is
/// depth first in source order; template argument values are walked as
/// part of [`Visitor::visit_template`].
pub trait Visitor<'tt, E> {
    /// Visits a [`Node::Text`].
    #[inline]
    fn visit_text(&mut self, _content: &'tt str) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Node::Bold`].
    #[inline]
    fn visit_bold(&mut self, children: &'tt [Node]) -> Result<(), E> {
        visit_nodes(self, children)
    }

    /// Visits a [`Node::Italic`].
    #[inline]
    fn visit_italic(&mut self, children: &'tt [Node]) -> Result<(), E> {
        visit_nodes(self, children)
    }

    /// Visits a [`Node::Header`].
    #[inline]
    fn visit_header(&mut self, _level: u8, children: &'tt [Node]) -> Result<(), E> {
        visit_nodes(self, children)
    }

    /// Visits a [`Node::Link`].
    #[inline]
    fn visit_link(&mut self, _target: &'tt str, _display: &'tt str) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Node::Category`].
    #[inline]
    fn visit_category(&mut self, _name: &'tt str) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Node::File`].
    #[inline]
    fn visit_file(&mut self, _name: &'tt str, _parameters: &'tt [String]) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Node::InterlangLink`].
    #[inline]
    fn visit_interlang_link(&mut self, _lang: &'tt str, _title: &'tt str) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Node::Template`].
    #[inline]
    fn visit_template(&mut self, _name: &'tt str, args: &'tt [TemplateArg]) -> Result<(), E> {
        walk_template_args(self, args)
    }

    /// Visits a [`Node::HtmlTag`].
    #[inline]
    fn visit_html_tag(
        &mut self,
        _tag: &'tt str,
        _attributes: &'tt HashMap<String, String>,
        children: &'tt [Node],
    ) -> Result<(), E> {
        visit_nodes(self, children)
    }

    /// Visits a [`Node::Comment`].
    #[inline]
    fn visit_comment(&mut self, _content: &'tt str) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Node::Nowiki`].
    #[inline]
    fn visit_nowiki(&mut self, _content: &'tt str) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Node::Ref`].
    #[inline]
    fn visit_ref(
        &mut self,
        _name: Option<&'tt str>,
        _group: Option<&'tt str>,
        children: &'tt [Node],
    ) -> Result<(), E> {
        visit_nodes(self, children)
    }

    /// Visits a [`Node::ListItem`].
    #[inline]
    fn visit_list_item(
        &mut self,
        _kind: ListKind,
        _level: usize,
        children: &'tt [Node],
    ) -> Result<(), E> {
        visit_nodes(self, children)
    }

    /// Visits a [`Node::Table`].
    #[inline]
    fn visit_table(&mut self, children: &'tt [Node]) -> Result<(), E> {
        visit_nodes(self, children)
    }

    /// Visits a [`Node::TableRow`].
    #[inline]
    fn visit_table_row(&mut self, children: &'tt [Node]) -> Result<(), E> {
        visit_nodes(self, children)
    }

    /// Visits a [`Node::TableCell`].
    #[inline]
    fn visit_table_cell(&mut self, _kind: CellKind, children: &'tt [Node]) -> Result<(), E> {
        visit_nodes(self, children)
    }
}

/// Visits a list of nodes in order.
pub fn visit_nodes<'tt, E, V>(visitor: &mut V, nodes: &'tt [Node]) -> Result<(), E>
where
    V: Visitor<'tt, E> + ?Sized,
{
    for node in nodes {
        visit_node(visitor, node)?;
    }
    Ok(())
}

/// Dispatches a single node to the matching visitor hook.
pub fn visit_node<'tt, E, V>(visitor: &mut V, node: &'tt Node) -> Result<(), E>
where
    V: Visitor<'tt, E> + ?Sized,
{
    match node {
        Node::Text { content } => visitor.visit_text(content),
        Node::Bold { children } => visitor.visit_bold(children),
        Node::Italic { children } => visitor.visit_italic(children),
        Node::Header { level, children } => visitor.visit_header(*level, children),
        Node::Link { target, display } => visitor.visit_link(target, display),
        Node::Category { name } => visitor.visit_category(name),
        Node::File { name, parameters } => visitor.visit_file(name, parameters),
        Node::InterlangLink { lang, title } => visitor.visit_interlang_link(lang, title),
        Node::Template { name, args } => visitor.visit_template(name, args),
        Node::HtmlTag {
            tag,
            attributes,
            children,
        } => visitor.visit_html_tag(tag, attributes, children),
        Node::Comment { content } => visitor.visit_comment(content),
        Node::Nowiki { content } => visitor.visit_nowiki(content),
        Node::Ref {
            name,
            group,
            children,
        } => visitor.visit_ref(name.as_deref(), group.as_deref(), children),
        Node::ListItem {
            kind,
            level,
            children,
        } => visitor.visit_list_item(*kind, *level, children),
        Node::Table { children } => visitor.visit_table(children),
        Node::TableRow { children } => visitor.visit_table_row(children),
        Node::TableCell { kind, children } => visitor.visit_table_cell(*kind, children),
    }
}

/// Visits the values of a template argument list in order.
pub fn walk_template_args<'tt, E, V>(visitor: &mut V, args: &'tt [TemplateArg]) -> Result<(), E>
where
    V: Visitor<'tt, E> + ?Sized,
{
    for arg in args {
        visit_nodes(visitor, arg.value())?;
    }
    Ok(())
}
