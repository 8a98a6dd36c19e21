//! Selective streaming decode.
//!
//! Walks the same grammar as the full decoder, but only materializes the
//! entries a [`SelectionTree`] asks for. Everything else is skipped without
//! building values, and decoding stops as soon as every selector has been
//! satisfied, so bytes after the last wanted field are never interpreted.
//! A repeated entry name among the entries that are interpreted fails with
//! [`Error::DuplicateName`], as it does for the full decoder.
//!
//! ```
//! use nbt_select::{Compound, Kind, NamedTag, SelectionTree, Selector, select_slice_be, to_vec_be};
//!
//! let mut b = Compound::new();
//! b.insert("c", "hi");
//! let mut root = NamedTag::compound("root");
//! root.as_compound_mut().unwrap().insert("a", 5i32);
//! root.as_compound_mut().unwrap().insert("b", b.clone());
//! let bytes = to_vec_be(&root).unwrap();
//!
//! let tree = SelectionTree::new([Selector::new(["b"], "c", Kind::String)]);
//! let picked = select_slice_be(&bytes, &tree).unwrap().unwrap();
//!
//! let mut expected = NamedTag::compound("root");
//! expected.as_compound_mut().unwrap().insert("b", b);
//! assert_eq!(picked, expected);
//! ```

use std::io::Read;

use rustc_hash::FxHashSet;
use tracing::trace;
use zerocopy::{BigEndian, LittleEndian};

use crate::{
    ByteOrder, CodecOptions, Compound, Error, Kind, KindRegistry, NamedTag, PrimitiveRead,
    Reader, Result, SelectionNode, SelectionTree, cold_path, read::Decoder,
};

/// What remains to be skipped before the next entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Skip {
    /// The payload of one unwanted entry.
    Payload(Kind),
    /// Every remaining entry of the current compound and its End, once the
    /// compound holds nothing else that is wanted.
    Remainder,
}

/// Why a selective decode stopped before the root compound closed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AbortReason {
    /// The document root is not a compound; there is no result.
    NotCompound,
    /// Every selector was satisfied; the result is complete.
    BudgetExhausted,
}

/// The position of a [`SelectiveDecoder`] in the document.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum State {
    /// Nothing read yet.
    AwaitingRoot,
    /// Between entries of the compound on top of the frame stack.
    InCompound,
    /// About to skip an unwanted subtree.
    SkippingSubtree(Skip),
    /// About to read the payload of a wanted entry in full.
    Materializing { kind: Kind, name: String },
    /// The root compound closed.
    Done,
    /// Stopped early; see [`AbortReason`].
    Aborted(AbortReason),
    /// A step failed; the stream cannot be trusted.
    Failed,
}

impl State {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Done | State::Aborted(_) | State::Failed)
    }
}

/// One open compound on the path from the root to the current entry.
struct Frame<'t> {
    node: &'t SelectionNode,
    name: String,
    result: Compound,
    /// Entry names read so far, wanted or not.
    seen: FxHashSet<String>,
    /// Selectors at or below `node` not yet satisfied.
    remaining: usize,
    /// Container nesting level, the root compound being 1.
    depth: usize,
}

/// Explicit state machine driving one selective decode.
///
/// Most callers want [`select`] or [`select_slice_be`]; driving
/// [`step`](Self::step) by hand exposes each transition.
pub struct SelectiveDecoder<'t, 'r, R> {
    decoder: Decoder<'r, R>,
    tree: &'t SelectionTree,
    stack: Vec<Frame<'t>>,
    budget: usize,
    state: State,
    output: Option<NamedTag>,
}

impl<'t, 'r, R: PrimitiveRead> SelectiveDecoder<'t, 'r, R> {
    pub fn new(
        input: R,
        tree: &'t SelectionTree,
        registry: &'r KindRegistry,
        options: CodecOptions,
    ) -> Self {
        Self {
            decoder: Decoder::new(input, registry, options),
            tree,
            stack: Vec::new(),
            budget: tree.len(),
            state: State::AwaitingRoot,
            output: None,
        }
    }

    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Selectors not yet satisfied.
    #[inline]
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Number of open compounds.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn position(&self) -> u64 {
        self.decoder.position()
    }

    /// Performs one transition. Does nothing once a terminal state is
    /// reached.
    pub fn step(&mut self) -> Result<()> {
        if self.state.is_terminal() {
            return Ok(());
        }
        let state = std::mem::replace(&mut self.state, State::Failed);
        self.state = self.transition(state)?;
        Ok(())
    }

    /// Steps until a terminal state and returns the partial tree, or `None`
    /// if the root was not a compound.
    pub fn run(mut self) -> Result<Option<NamedTag>> {
        while !self.state.is_terminal() {
            self.step()?;
        }
        Ok(self.output)
    }

    /// The partial tree, available once the decoder is terminal.
    pub fn finish(self) -> Option<NamedTag> {
        self.output
    }

    fn transition(&mut self, state: State) -> Result<State> {
        match state {
            State::AwaitingRoot => self.enter_root(),
            State::InCompound => self.next_entry(),
            State::SkippingSubtree(Skip::Payload(kind)) => {
                let depth = self.top_depth();
                self.decoder.skip_payload(kind, depth)?;
                Ok(State::InCompound)
            }
            State::SkippingSubtree(Skip::Remainder) => {
                let depth = self.top_depth();
                self.decoder.skip_compound_rest(depth)?;
                Ok(self.close_frame())
            }
            State::Materializing { kind, name } => self.materialize(kind, name),
            terminal => Ok(terminal),
        }
    }

    fn enter_root(&mut self) -> Result<State> {
        let kind = self.decoder.read_kind()?;
        if kind != Kind::Compound {
            trace!(?kind, "selective decode rejected non-compound root");
            return Ok(State::Aborted(AbortReason::NotCompound));
        }
        let name = self.decoder.read_name()?;
        let depth = self.decoder.enter(0)?;
        self.stack.push(Frame {
            node: self.tree.root(),
            name,
            result: Compound::new(),
            seen: FxHashSet::default(),
            remaining: self.tree.len(),
            depth,
        });
        if self.budget == 0 {
            return Ok(self.exhausted());
        }
        Ok(State::InCompound)
    }

    fn next_entry(&mut self) -> Result<State> {
        let kind = self.decoder.read_kind()?;
        if kind == Kind::End {
            return Ok(self.close_frame());
        }
        let offset = self.decoder.position();
        let name = self.decoder.read_name()?;
        let Some(frame) = self.stack.last_mut() else {
            return Ok(State::Failed);
        };
        if !frame.seen.insert(name.clone()) {
            cold_path();
            return Err(Error::DuplicateName { name, offset });
        }
        let (node, parent_depth) = (frame.node, frame.depth);
        if node.is_wanted(self.stack.len() - 1, &name, kind) {
            return Ok(State::Materializing { kind, name });
        }
        if kind == Kind::Compound {
            if let Some(child) = node.child(&name) {
                let depth = self.decoder.enter(parent_depth)?;
                self.stack.push(Frame {
                    node: child,
                    name,
                    result: Compound::new(),
                    seen: FxHashSet::default(),
                    remaining: child.total(),
                    depth,
                });
                return Ok(State::InCompound);
            }
        }
        Ok(State::SkippingSubtree(Skip::Payload(kind)))
    }

    fn materialize(&mut self, kind: Kind, name: String) -> Result<State> {
        let depth = self.top_depth();
        let value = self.decoder.read_payload(kind, depth)?;
        if let Some(frame) = self.stack.last_mut() {
            frame.result.insert(name, value);
        }
        self.budget -= 1;
        for frame in &mut self.stack {
            frame.remaining = frame.remaining.saturating_sub(1);
        }
        if self.budget == 0 {
            return Ok(self.exhausted());
        }
        match self.stack.last() {
            Some(frame) if frame.remaining == 0 => Ok(State::SkippingSubtree(Skip::Remainder)),
            _ => Ok(State::InCompound),
        }
    }

    /// Pops the top frame and attaches its result to the parent, unless the
    /// subtree produced nothing.
    fn close_frame(&mut self) -> State {
        let Some(frame) = self.stack.pop() else {
            return State::Failed;
        };
        match self.stack.last_mut() {
            Some(parent) => {
                if !frame.result.is_empty() {
                    parent.result.insert(frame.name, frame.result);
                }
                if parent.remaining == 0 {
                    State::SkippingSubtree(Skip::Remainder)
                } else {
                    State::InCompound
                }
            }
            None => {
                trace!(
                    position = self.decoder.position(),
                    unmatched = self.budget,
                    "selective decode reached end of root"
                );
                self.output = Some(NamedTag::new(frame.name, frame.result));
                State::Done
            }
        }
    }

    /// Closes every open frame without reading further input.
    fn exhausted(&mut self) -> State {
        trace!(
            position = self.decoder.position(),
            "all selectors satisfied, stopping early"
        );
        while !self.stack.is_empty() {
            self.close_frame();
        }
        State::Aborted(AbortReason::BudgetExhausted)
    }

    #[inline]
    fn top_depth(&self) -> usize {
        self.stack.last().map_or(0, |frame| frame.depth)
    }
}

/// Selectively decodes one document from `reader` in byte order `O`,
/// resolving custom kinds through [`KindRegistry::global`].
///
/// Returns `Ok(None)` if the root is not a compound.
pub fn select<O: ByteOrder>(reader: impl Read, tree: &SelectionTree) -> Result<Option<NamedTag>> {
    select_with::<O>(reader, tree, KindRegistry::global(), &CodecOptions::default())
}

pub fn select_with<O: ByteOrder>(
    reader: impl Read,
    tree: &SelectionTree,
    registry: &KindRegistry,
    options: &CodecOptions,
) -> Result<Option<NamedTag>> {
    SelectiveDecoder::new(Reader::<_, O>::new(reader), tree, registry, *options).run()
}

#[inline]
pub fn select_slice_be(source: &[u8], tree: &SelectionTree) -> Result<Option<NamedTag>> {
    select::<BigEndian>(source, tree)
}

#[inline]
pub fn select_slice_le(source: &[u8], tree: &SelectionTree) -> Result<Option<NamedTag>> {
    select::<LittleEndian>(source, tree)
}
