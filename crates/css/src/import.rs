//! `@import` resolution.
//!
//! A session sanitizes the top-level sheet, leaving a slot wherever an
//! import appeared, and hands each import URL to the caller's fetcher. The
//! caller feeds fetched CSS back through [`ImportSession::resolve`], which
//! sanitizes it in place (issuing nested imports the same way) and reports
//! progress through the continuation.

use std::fmt;
use std::sync::mpsc;

use crate::error::ImportError;
use crate::property::CssUriRewriter;
use crate::selector::Virtualization;
use crate::stylesheet::{Chunk, SanitizedSheet, sanitize_sheet};

/// Imports nested deeper than this are dropped, which also ends import
/// cycles.
pub const MAX_IMPORT_DEPTH: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImportId(usize);

impl fmt::Display for ImportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import #{}", self.0)
    }
}

/// Handed to the fetcher: load `url` and pass its text to
/// [`ImportSession::resolve`] with `id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportRequest {
    pub id: ImportId,
    pub url: String,
}

#[derive(Debug)]
enum Node {
    Text(String),
    Slot(ImportId),
}

#[derive(Debug)]
struct Slot {
    url: String,
    media_query: String,
    depth: usize,
    content: Option<Vec<Node>>,
}

enum Work<'s> {
    Node(&'s Node),
    OpenMedia(&'s str),
    CloseMedia,
}

pub struct ImportSession<'v, F, C> {
    virtualization: &'v Virtualization<'v>,
    uri_rewriter: Option<&'v dyn CssUriRewriter>,
    fetch: F,
    continuation: C,
    root: Vec<Node>,
    slots: Vec<Slot>,
    pending: usize,
}

impl<'v, F, C> ImportSession<'v, F, C>
where
    F: FnMut(ImportRequest),
    C: FnMut(&str, bool),
{
    /// Sanitizes `css` and requests every import it contains.
    ///
    /// `fetch` is called once per import, before this returns for
    /// top-level imports and during [`resolve`](Self::resolve) for nested
    /// ones. `continuation` receives each filled import's sanitized text
    /// and whether other imports are still outstanding.
    pub fn start(
        base_uri: Option<&str>,
        css: &str,
        virtualization: &'v Virtualization<'v>,
        uri_rewriter: Option<&'v dyn CssUriRewriter>,
        fetch: F,
        continuation: C,
    ) -> Self {
        let mut session = Self {
            virtualization,
            uri_rewriter,
            fetch,
            continuation,
            root: Vec::new(),
            slots: Vec::new(),
            pending: 0,
        };
        let sheet = sanitize_sheet(base_uri, css, virtualization, uri_rewriter, true);
        session.root = session.adopt(sheet, 0);
        session
    }

    /// Turns a sanitized sheet into nodes, opening a slot and issuing a
    /// fetch for each of its imports.
    fn adopt(&mut self, sheet: SanitizedSheet, depth: usize) -> Vec<Node> {
        let SanitizedSheet { chunks, imports } = sheet;
        let mut ids = Vec::with_capacity(imports.len());
        for import in imports {
            if depth >= MAX_IMPORT_DEPTH {
                log::debug!(target: "sanitizer.stylesheet", "dropping @import of {} nested too deep", import.url);
                ids.push(None);
                continue;
            }
            let id = ImportId(self.slots.len());
            self.slots.push(Slot {
                url: import.url.clone(),
                media_query: import.media_query,
                depth: depth + 1,
                content: None,
            });
            self.pending += 1;
            ids.push(Some(id));
            (self.fetch)(ImportRequest { id, url: import.url });
        }
        chunks
            .into_iter()
            .filter_map(|chunk| match chunk {
                Chunk::Text(text) => Some(Node::Text(text)),
                Chunk::Import(index) => ids.get(index).copied().flatten().map(Node::Slot),
            })
            .collect()
    }

    /// Fills the slot of `id` with the sanitized form of `css`.
    pub fn resolve(&mut self, id: ImportId, css: &str) -> Result<(), ImportError> {
        let slot = self.slots.get(id.0).ok_or(ImportError::UnknownImport(id))?;
        if slot.content.is_some() {
            return Err(ImportError::AlreadyResolved(id));
        }
        let base = slot.url.clone();
        let depth = slot.depth;
        let sheet = sanitize_sheet(
            Some(&base),
            css,
            self.virtualization,
            self.uri_rewriter,
            true,
        );
        let nodes = self.adopt(sheet, depth);
        self.slots[id.0].content = Some(nodes);
        self.pending -= 1;

        let filled = self.render(std::slice::from_ref(&Node::Slot(id)));
        let more_to_come = self.more_to_come();
        (self.continuation)(&filled, more_to_come);
        Ok(())
    }

    /// Whether any requested import is still unresolved.
    pub fn more_to_come(&self) -> bool {
        self.pending > 0
    }

    /// The sanitized stylesheet. Unresolved imports contribute nothing.
    pub fn result(&self) -> String {
        self.render(&self.root)
    }

    fn render(&self, nodes: &[Node]) -> String {
        let mut out = String::new();
        let mut work: Vec<Work<'_>> = nodes.iter().rev().map(Work::Node).collect();
        while let Some(item) = work.pop() {
            match item {
                Work::Node(Node::Text(text)) => out.push_str(text),
                Work::Node(Node::Slot(id)) => {
                    let Some(slot) = self.slots.get(id.0) else {
                        continue;
                    };
                    let Some(content) = &slot.content else {
                        continue;
                    };
                    let wrapped = !slot.media_query.is_empty();
                    if wrapped {
                        work.push(Work::CloseMedia);
                    }
                    work.extend(content.iter().rev().map(Work::Node));
                    if wrapped {
                        work.push(Work::OpenMedia(&slot.media_query));
                    }
                }
                Work::OpenMedia(query) => {
                    out.push_str("@media ");
                    out.push_str(query);
                    out.push_str(" {");
                }
                Work::CloseMedia => out.push('}'),
            }
        }
        out
    }
}

impl<F, C> fmt::Debug for ImportSession<'_, F, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportSession")
            .field("slots", &self.slots.len())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

/// Sanitizes a stylesheet, loading every `@import` with `load` before
/// returning.
///
/// `load` receives absolute URLs; returning `None` leaves that import
/// empty.
pub fn sanitize_stylesheet_with_loader<L>(
    base_uri: Option<&str>,
    css: &str,
    virtualization: &Virtualization<'_>,
    uri_rewriter: Option<&dyn CssUriRewriter>,
    mut load: L,
) -> String
where
    L: FnMut(&str) -> Option<String>,
{
    let (requests_tx, requests) = mpsc::channel();
    let mut session = ImportSession::start(
        base_uri,
        css,
        virtualization,
        uri_rewriter,
        move |request: ImportRequest| {
            let _ = requests_tx.send(request);
        },
        |_: &str, _: bool| {},
    );
    while let Ok(request) = requests.try_recv() {
        let text = load(&request.url).unwrap_or_else(|| {
            log::debug!(target: "sanitizer.stylesheet", "no content for {}", request.url);
            String::new()
        });
        if let Err(err) = session.resolve(request.id, &text) {
            log::warn!(target: "sanitizer.stylesheet", "{err}");
        }
    }
    session.result()
}
