//! The chain builder.
//!
//! A [`Chain`] holds an ordered list of [`Layer`]s and an optional terminal
//! [`RequestFn`]. Declaration order is execution-entry order: the layer at
//! index `0` is the outermost, the last one sits next to the terminal.
//!
//! ```text
//! layers[0] → layers[1] → … → layers[n-1] → terminal
//! ```
//!
//! Mutators take `&mut self`, return `&mut Self` for chaining, and quietly
//! ignore absent (`None`) arguments. Only the strict constructor
//! [`Chain::try_from_layers`] rejects them.
//!
//! # Example
//!
//! ```
//! use lamina_core::RequestFn;
//! use lamina_middleware::Chain;
//!
//! let f1 = RequestFn::from_sync(|writer, _| { writer.write_str("f1"); });
//! let f2 = RequestFn::from_sync(|writer, _| { writer.write_str("f2"); });
//!
//! let mut chain = Chain::new();
//! chain.append_pre_fn(f1).append_post_fn(f2).append(None);
//!
//! assert_eq!(chain.len(), 2);
//! ```

use lamina_core::RequestFn;

use crate::adapter::PrePost;
use crate::error::{ChainError, ChainResult};
use crate::layer::Layer;

/// An ordered, mutable collection of layers plus an optional terminal function.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    /// Layers in declaration order; never contains an absent entry.
    layers: Vec<Layer>,

    /// Function run at the innermost position when composing.
    terminal: Option<RequestFn>,
}

impl Chain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chain from layers, rejecting absent entries.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::AbsentLayer`] with the position of the first
    /// `None` among `layers`.
    pub fn try_from_layers<I, L>(layers: I) -> ChainResult<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<Option<Layer>>,
    {
        let layers = layers
            .into_iter()
            .enumerate()
            .map(|(index, layer)| layer.into().ok_or(ChainError::AbsentLayer { index }))
            .collect::<ChainResult<Vec<_>>>()?;

        Ok(Self {
            layers,
            terminal: None,
        })
    }

    /// Creates a chain from layers, or `None` if any of them is absent.
    pub fn from_layers<I, L>(layers: I) -> Option<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<Option<Layer>>,
    {
        match Self::try_from_layers(layers) {
            Ok(chain) => Some(chain),
            Err(err) => {
                tracing::warn!(error = %err, "rejected chain construction");
                None
            }
        }
    }

    /// Appends a layer at the tail.
    pub fn append(&mut self, layer: impl Into<Option<Layer>>) -> &mut Self {
        match layer.into() {
            Some(layer) => self.layers.push(layer),
            None => tracing::trace!("ignoring absent layer on append"),
        }
        self
    }

    /// Appends `func` as a layer running before everything downstream.
    pub fn append_pre_fn(&mut self, func: impl Into<Option<RequestFn>>) -> &mut Self {
        let layer = func.into().map(|func| PrePost::new(func).as_pre());
        self.append(layer)
    }

    /// Appends `func` as a layer running after everything downstream.
    pub fn append_post_fn(&mut self, func: impl Into<Option<RequestFn>>) -> &mut Self {
        let layer = func.into().map(|func| PrePost::new(func).as_post());
        self.append(layer)
    }

    /// Inserts a layer at `index`.
    ///
    /// - `index < 0` inserts at the head.
    /// - `index >= len` (or an empty chain) appends at the tail.
    /// - Otherwise the layer lands at `index` and later layers shift right.
    pub fn insert(&mut self, layer: impl Into<Option<Layer>>, index: isize) -> &mut Self {
        let Some(layer) = layer.into() else {
            tracing::trace!(index, "ignoring absent layer on insert");
            return self;
        };

        let position = usize::try_from(index).unwrap_or(0);
        if position >= self.layers.len() {
            self.layers.push(layer);
        } else {
            self.layers.insert(position, layer);
        }
        self
    }

    /// Inserts `func` as a pre layer at `index`; see [`insert`](Self::insert).
    pub fn insert_pre_fn(
        &mut self,
        func: impl Into<Option<RequestFn>>,
        index: isize,
    ) -> &mut Self {
        let layer = func.into().map(|func| PrePost::new(func).as_pre());
        self.insert(layer, index)
    }

    /// Inserts `func` as a post layer at `index`; see [`insert`](Self::insert).
    pub fn insert_post_fn(
        &mut self,
        func: impl Into<Option<RequestFn>>,
        index: isize,
    ) -> &mut Self {
        let layer = func.into().map(|func| PrePost::new(func).as_post());
        self.insert(layer, index)
    }

    /// Appends every present layer, in order.
    pub fn extend<I, L>(&mut self, layers: I) -> &mut Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Option<Layer>>,
    {
        for layer in layers {
            self.append(layer);
        }
        self
    }

    /// Appends every present function as a pre layer, in order.
    pub fn extend_pre_fn<I, F>(&mut self, funcs: I) -> &mut Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Option<RequestFn>>,
    {
        for func in funcs {
            self.append_pre_fn(func);
        }
        self
    }

    /// Appends every present function as a post layer, in order.
    pub fn extend_post_fn<I, F>(&mut self, funcs: I) -> &mut Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Option<RequestFn>>,
    {
        for func in funcs {
            self.append_post_fn(func);
        }
        self
    }

    /// Appends the layers of `other`.
    ///
    /// The terminal function of `other` is not transferred.
    pub fn join<'o>(&mut self, other: impl Into<Option<&'o Chain>>) -> &mut Self {
        match other.into() {
            Some(other) => self.layers.extend(other.layers.iter().cloned()),
            None => tracing::trace!("ignoring absent chain on join"),
        }
        self
    }

    /// Sets the terminal function; an absent one keeps the current value.
    pub fn set_terminal_fn(&mut self, func: impl Into<Option<RequestFn>>) -> &mut Self {
        match func.into() {
            Some(func) => self.terminal = Some(func),
            None => tracing::trace!("ignoring absent terminal function"),
        }
        self
    }

    /// Returns the number of layers, counting the terminal function if set.
    pub fn len(&self) -> usize {
        self.layers.len() + usize::from(self.terminal.is_some())
    }

    /// Returns `true` if there are no layers and no terminal function.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the layers in declaration order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the terminal function, if set.
    pub fn terminal_fn(&self) -> Option<&RequestFn> {
        self.terminal.as_ref()
    }
}

impl FromIterator<Layer> for Chain {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
            terminal: None,
        }
    }
}

impl Extend<Layer> for Chain {
    fn extend<I: IntoIterator<Item = Layer>>(&mut self, iter: I) {
        self.layers.extend(iter);
    }
}
