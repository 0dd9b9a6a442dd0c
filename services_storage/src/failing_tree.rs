//! # Failing Tree
//!
//! A TreeProvider wrapper that can simulate storage failures for testing.
//! Useful for exercising every failure path of resolution, listing and
//! reading without a misbehaving storage backend.

use crate::provider::{ByteStream, ChildEntry, ProviderError, TreeProvider};
use core_types::{CapabilityError, RootCapability};
use std::cell::Cell;
use std::io::{self, Read};

/// Policy for when failures should occur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Never fail (passthrough)
    Never,
    /// Reject every root capability
    RejectRoots,
    /// Fail every child lookup as if the storage were unreachable
    UnreachableLookups,
    /// Report directories with these names as gone when enumerated
    VanishOnList(Vec<String>),
    /// Refuse to open streams for nodes with these names
    NoStream(Vec<String>),
    /// Streams fail with an IO error once this many bytes were delivered
    FailReadsAfter(usize),
    /// Streams report at most `chunk` available bytes and return at most
    /// `chunk` bytes per read
    ConservativeAvailable(usize),
}

/// A node of the wrapped provider, tagged with its entry name
///
/// The root's name is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedNode<N> {
    pub inner: N,
    pub name: String,
}

/// Wrapper around a TreeProvider that can simulate failures
pub struct FailingTree<P: TreeProvider> {
    inner: P,
    policy: FailurePolicy,
    opened_streams: Cell<usize>,
    live_streams: Cell<usize>,
}

impl<P: TreeProvider> FailingTree<P> {
    /// Create a new failing tree with the given policy
    pub fn new(inner: P, policy: FailurePolicy) -> Self {
        Self {
            inner,
            policy,
            opened_streams: Cell::new(0),
            live_streams: Cell::new(0),
        }
    }

    /// Get the underlying provider (for inspection)
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Get mutable access to the underlying provider
    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.inner
    }

    /// Number of streams opened so far
    pub fn opened_streams(&self) -> usize {
        self.opened_streams.get()
    }

    /// Number of streams opened and not yet dropped
    pub fn live_streams(&self) -> usize {
        self.live_streams.get()
    }

    /// Reset the failure policy
    pub fn set_policy(&mut self, policy: FailurePolicy) {
        self.policy = policy;
        self.opened_streams.set(0);
    }

    fn named_in(names: &[String], node: &TrackedNode<P::Node>) -> bool {
        names.iter().any(|n| *n == node.name)
    }
}

impl<P: TreeProvider> TreeProvider for FailingTree<P> {
    type Node = TrackedNode<P::Node>;

    fn open_root(&self, root: &RootCapability) -> Result<Self::Node, ProviderError> {
        if self.policy == FailurePolicy::RejectRoots {
            return Err(CapabilityError::Revoked(root.token().to_string()).into());
        }
        Ok(TrackedNode {
            inner: self.inner.open_root(root)?,
            name: String::new(),
        })
    }

    fn children(&self, dir: &Self::Node) -> Result<Vec<ChildEntry<Self::Node>>, ProviderError> {
        if let FailurePolicy::VanishOnList(names) = &self.policy {
            if Self::named_in(names, dir) {
                return Err(ProviderError::Gone(dir.name.clone()));
            }
        }
        Ok(self
            .inner
            .children(&dir.inner)?
            .into_iter()
            .map(|child| {
                let name = child.name.clone();
                child.map_node(|inner| TrackedNode { inner, name })
            })
            .collect())
    }

    fn find_child(
        &self,
        dir: &Self::Node,
        name: &str,
    ) -> Result<Option<ChildEntry<Self::Node>>, ProviderError> {
        if self.policy == FailurePolicy::UnreachableLookups {
            return Err(ProviderError::Io(io::Error::new(
                io::ErrorKind::NotConnected,
                "storage unreachable",
            )));
        }
        Ok(self.inner.find_child(&dir.inner, name)?.map(|child| {
            let name = child.name.clone();
            child.map_node(|inner| TrackedNode { inner, name })
        }))
    }

    fn exists(&self, node: &Self::Node) -> bool {
        self.inner.exists(&node.inner)
    }

    fn open_stream(&self, node: &Self::Node) -> Result<Box<dyn ByteStream + '_>, ProviderError> {
        if let FailurePolicy::NoStream(names) = &self.policy {
            if Self::named_in(names, node) {
                return Err(ProviderError::StreamUnavailable(node.name.clone()));
            }
        }
        let inner = self.inner.open_stream(&node.inner)?;
        let (fail_after, chunk) = match self.policy {
            FailurePolicy::FailReadsAfter(n) => (Some(n), None),
            FailurePolicy::ConservativeAvailable(n) => (None, Some(n)),
            _ => (None, None),
        };
        self.opened_streams.set(self.opened_streams.get() + 1);
        self.live_streams.set(self.live_streams.get() + 1);
        Ok(Box::new(FaultyStream {
            inner,
            live: &self.live_streams,
            fail_after,
            chunk,
            delivered: 0,
        }))
    }
}

struct FaultyStream<'a> {
    inner: Box<dyn ByteStream + 'a>,
    live: &'a Cell<usize>,
    fail_after: Option<usize>,
    chunk: Option<usize>,
    delivered: usize,
}

impl Read for FaultyStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut max = buf.len();
        if let Some(limit) = self.fail_after {
            if self.delivered >= limit {
                return Err(io::Error::new(io::ErrorKind::Other, "injected read failure"));
            }
            max = max.min(limit - self.delivered);
        }
        if let Some(chunk) = self.chunk {
            max = max.min(chunk);
        }
        let n = self.inner.read(&mut buf[..max])?;
        self.delivered += n;
        Ok(n)
    }
}

impl ByteStream for FaultyStream<'_> {
    fn available(&mut self) -> io::Result<usize> {
        let available = self.inner.available()?;
        Ok(match self.chunk {
            Some(chunk) => available.min(chunk),
            None => available,
        })
    }
}

impl Drop for FaultyStream<'_> {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}
