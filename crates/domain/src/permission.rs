//! Two-level admin permission tree.
//!
//! A [`PermissionTree`] holds top-level [`PermissionNode`]s, each of which owns
//! an ordered list of [`SubPermissionNode`]s. Sub-permissions carry no children,
//! so the tree can never be deeper than two levels.
//!
//! Grant state is independent per node: toggling a parent never touches its
//! children and toggling a child never touches its parent. Use
//! [`PermissionTree::revoke_with_children`] when a cascading revoke is wanted.

use std::collections::BTreeSet;

use gamedesk_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Finer-grained capability nested under one top-level permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPermissionNode {
    name: NonEmptyString,
    granted: bool,
}

impl SubPermissionNode {
    /// Creates a validated sub-permission.
    pub fn new(name: impl Into<String>, granted: bool) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            granted,
        })
    }

    /// Returns the sub-permission name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns whether the sub-permission is granted.
    #[must_use]
    pub fn granted(&self) -> bool {
        self.granted
    }
}

/// Top-level named capability with its sub-permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PermissionNodeFields")]
pub struct PermissionNode {
    name: NonEmptyString,
    granted: bool,
    sub_permissions: Vec<SubPermissionNode>,
}

impl PermissionNode {
    /// Creates a validated permission node.
    ///
    /// Sub-permission names must be unique within the node, ignoring case.
    pub fn new(
        name: impl Into<String>,
        granted: bool,
        sub_permissions: Vec<SubPermissionNode>,
    ) -> AppResult<Self> {
        let name = NonEmptyString::new(name)?;

        for (position, sub_permission) in sub_permissions.iter().enumerate() {
            let duplicated = sub_permissions[..position]
                .iter()
                .any(|earlier| earlier.name.eq_ignore_case(sub_permission.name.as_str()));
            if duplicated {
                return Err(AppError::DuplicateName(format!(
                    "sub-permission '{}' appears more than once under '{}'",
                    sub_permission.name, name
                )));
            }
        }

        Ok(Self {
            name,
            granted,
            sub_permissions,
        })
    }

    /// Returns the permission name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns whether the permission is granted.
    #[must_use]
    pub fn granted(&self) -> bool {
        self.granted
    }

    /// Returns the ordered sub-permissions.
    #[must_use]
    pub fn sub_permissions(&self) -> &[SubPermissionNode] {
        &self.sub_permissions
    }

    fn sub_permission_mut(&mut self, sub_index: usize) -> AppResult<&mut SubPermissionNode> {
        let parent = self.name.clone();
        self.sub_permissions.get_mut(sub_index).ok_or_else(|| {
            AppError::Validation(format!(
                "sub-permission index {sub_index} is out of range for '{parent}'"
            ))
        })
    }
}

#[derive(Deserialize)]
struct PermissionNodeFields {
    name: String,
    granted: bool,
    sub_permissions: Vec<SubPermissionNode>,
}

impl TryFrom<PermissionNodeFields> for PermissionNode {
    type Error = AppError;

    fn try_from(fields: PermissionNodeFields) -> Result<Self, Self::Error> {
        Self::new(fields.name, fields.granted, fields.sub_permissions)
    }
}

/// Ordered top-level permission list owned by one admin.
///
/// The tree is a plain value: cloning it yields an independent copy, so an
/// editing session never shares state with a cached record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PermissionTreeFields")]
pub struct PermissionTree {
    nodes: Vec<PermissionNode>,
}

#[derive(Deserialize)]
struct PermissionTreeFields {
    nodes: Vec<PermissionNode>,
}

impl TryFrom<PermissionTreeFields> for PermissionTree {
    type Error = AppError;

    fn try_from(fields: PermissionTreeFields) -> Result<Self, Self::Error> {
        Self::from_nodes(fields.nodes)
    }
}

impl PermissionTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from existing nodes, enforcing top-level name uniqueness.
    pub fn from_nodes(nodes: Vec<PermissionNode>) -> AppResult<Self> {
        for (position, node) in nodes.iter().enumerate() {
            if nodes[..position]
                .iter()
                .any(|earlier| earlier.name.eq_ignore_case(node.name.as_str()))
            {
                return Err(AppError::DuplicateName(format!(
                    "permission '{}' appears more than once",
                    node.name
                )));
            }
        }

        Ok(Self { nodes })
    }

    /// Returns the ordered top-level nodes.
    #[must_use]
    pub fn nodes(&self) -> &[PermissionNode] {
        &self.nodes
    }

    /// Returns the number of top-level nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the tree has no top-level nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finds a top-level node by name, ignoring case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&PermissionNode> {
        self.nodes.iter().find(|node| node.name.eq_ignore_case(name))
    }

    /// Appends a granted top-level permission with no sub-permissions.
    pub fn add_top_level(&mut self, name: &str) -> AppResult<()> {
        let name = NonEmptyString::new(name)
            .map_err(|_| AppError::Validation("permission name must not be empty".to_owned()))?;

        if self.find(name.as_str()).is_some() {
            return Err(AppError::DuplicateName(format!(
                "permission '{name}' already exists"
            )));
        }

        self.nodes.push(PermissionNode {
            name,
            granted: true,
            sub_permissions: Vec::new(),
        });
        Ok(())
    }

    /// Removes and returns the top-level node at `index`.
    pub fn remove_top_level(&mut self, index: usize) -> AppResult<PermissionNode> {
        self.node_mut(index)?;
        Ok(self.nodes.remove(index))
    }

    /// Appends a granted sub-permission under the node at `parent_index`.
    pub fn add_sub_permission(&mut self, parent_index: usize, name: &str) -> AppResult<()> {
        let parent = self.node_mut(parent_index)?;
        let name = NonEmptyString::new(name).map_err(|_| {
            AppError::Validation("sub-permission name must not be empty".to_owned())
        })?;

        if parent
            .sub_permissions
            .iter()
            .any(|existing| existing.name.eq_ignore_case(name.as_str()))
        {
            return Err(AppError::DuplicateName(format!(
                "sub-permission '{name}' already exists under '{}'",
                parent.name
            )));
        }

        parent.sub_permissions.push(SubPermissionNode {
            name,
            granted: true,
        });
        Ok(())
    }

    /// Removes and returns one sub-permission.
    pub fn remove_sub_permission(
        &mut self,
        parent_index: usize,
        sub_index: usize,
    ) -> AppResult<SubPermissionNode> {
        let parent = self.node_mut(parent_index)?;
        parent.sub_permission_mut(sub_index)?;
        Ok(parent.sub_permissions.remove(sub_index))
    }

    /// Flips the grant flag of a top-level node and returns the new value.
    pub fn toggle_granted(&mut self, index: usize) -> AppResult<bool> {
        let node = self.node_mut(index)?;
        node.granted = !node.granted;
        Ok(node.granted)
    }

    /// Flips the grant flag of a sub-permission and returns the new value.
    pub fn toggle_sub_granted(&mut self, parent_index: usize, sub_index: usize) -> AppResult<bool> {
        let sub_permission = self
            .node_mut(parent_index)?
            .sub_permission_mut(sub_index)?;
        sub_permission.granted = !sub_permission.granted;
        Ok(sub_permission.granted)
    }

    /// Revokes a top-level node together with every sub-permission under it.
    pub fn revoke_with_children(&mut self, index: usize) -> AppResult<()> {
        let node = self.node_mut(index)?;
        node.granted = false;
        for sub_permission in &mut node.sub_permissions {
            sub_permission.granted = false;
        }
        Ok(())
    }

    /// Returns the names of granted top-level nodes, lowercased.
    #[must_use]
    pub fn granted_names(&self) -> BTreeSet<String> {
        self.nodes
            .iter()
            .filter(|node| node.granted)
            .map(|node| node.name.as_str().to_lowercase())
            .collect()
    }

    fn node_mut(&mut self, index: usize) -> AppResult<&mut PermissionNode> {
        self.nodes.get_mut(index).ok_or_else(|| {
            AppError::Validation(format!("permission index {index} is out of range"))
        })
    }
}
