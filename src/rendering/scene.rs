use crate::{
    prelude::HashMap,
    rendering::surface::{circle_path_data, Attribute, AttributeKey, NodeId, NodeKind, RenderSurface},
    MapError, Result,
};
use std::collections::BTreeMap;
use std::fmt::Write;

/// A single retained node
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    attributes: BTreeMap<AttributeKey, Attribute>,
}

impl SceneNode {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(&self, key: &AttributeKey) -> Option<&Attribute> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }
}

/// In-memory scene graph rooted at a single pane node
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: HashMap<NodeId, SceneNode>,
    root: NodeId,
    next_id: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        let root = NodeId::new(0);
        let mut nodes = HashMap::default();
        nodes.insert(root, SceneNode::new(NodeKind::Pane, None));
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    /// The pane node every other node descends from
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn attribute(&self, id: NodeId, key: &AttributeKey) -> Option<&Attribute> {
        self.nodes.get(&id).and_then(|node| node.attribute(key))
    }

    /// Number of live nodes, the root pane included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Counts nodes of `kind` below `id` (excluding `id` itself)
    pub fn count_descendants(&self, id: NodeId, kind: NodeKind) -> usize {
        self.children(id)
            .iter()
            .map(|child| {
                let own = self
                    .nodes
                    .get(child)
                    .map(|node| usize::from(node.kind == kind))
                    .unwrap_or(0);
                own + self.count_descendants(*child, kind)
            })
            .sum()
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| MapError::Render(format!("unknown node {}", id.value())))
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children {
                self.remove_subtree(child);
            }
        }
    }

    /// Serialises the subtree rooted at `id` as SVG/HTML markup
    pub fn to_svg(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        self.write_node(id, &mut out)?;
        Ok(out)
    }

    fn write_node(&self, id: NodeId, out: &mut String) -> Result<()> {
        let node = self
            .nodes
            .get(&id)
            .ok_or_else(|| MapError::Render(format!("unknown node {}", id.value())))?;
        let tag = node.kind.tag();
        let fmt_err = |e: std::fmt::Error| MapError::Render(e.to_string());

        out.push('<');
        out.push_str(tag);
        if node.kind == NodeKind::Surface {
            out.push_str(" xmlns=\"http://www.w3.org/2000/svg\"");
        }

        let mut style = Vec::new();
        for attribute in node.attributes() {
            match attribute {
                Attribute::Class(class) => write!(out, " class=\"{}\"", class).map_err(fmt_err)?,
                Attribute::Size { width, height } => {
                    write!(out, " width=\"{}\" height=\"{}\"", width, height).map_err(fmt_err)?
                }
                Attribute::Margin(offset) => {
                    style.push(format!("margin-left: {}px", offset.x));
                    style.push(format!("margin-top: {}px", offset.y));
                }
                Attribute::Translate(offset) => {
                    write!(out, " transform=\"translate({},{})\"", offset.x, offset.y)
                        .map_err(fmt_err)?
                }
                Attribute::Circle { center, radius } => {
                    write!(out, " d=\"{}\"", circle_path_data(*center, *radius)).map_err(fmt_err)?
                }
                Attribute::Style { name, value } => style.push(format!("{}: {}", name, value)),
            }
        }
        if !style.is_empty() {
            write!(out, " style=\"{}\"", style.join("; ")).map_err(fmt_err)?;
        }

        if node.children.is_empty() {
            out.push_str("/>");
            return Ok(());
        }

        out.push('>');
        for child in &node.children {
            self.write_node(*child, out)?;
        }
        write!(out, "</{}>", tag).map_err(fmt_err)?;
        Ok(())
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for SceneGraph {
    fn create_node(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId> {
        let id = NodeId::new(self.next_id);
        self.node_mut(parent)?.children.push(id);
        self.next_id += 1;
        self.nodes.insert(id, SceneNode::new(kind, Some(parent)));
        Ok(id)
    }

    fn set_attribute(&mut self, node: NodeId, attribute: Attribute) -> Result<()> {
        self.node_mut(node)?
            .attributes
            .insert(attribute.key(), attribute);
        Ok(())
    }

    fn remove_node(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(MapError::Render("cannot remove the root pane".to_string()));
        }
        let parent = self
            .nodes
            .get(&node)
            .ok_or_else(|| MapError::Render(format!("unknown node {}", node.value())))?
            .parent;

        if let Some(parent) = parent {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|child| *child != node);
            }
        }
        self.remove_subtree(node);
        Ok(())
    }
}
