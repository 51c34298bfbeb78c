// Block splitter: group filtered lines into flat `kind { ... }` blocks

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// `hoststatus {`, `info {`, ... anywhere on the line.
static BLOCK_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+) \{").expect("static regex must compile"));
/// A tab followed by the closing brace.
static BLOCK_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\t\}").expect("static regex must compile"));

/// Block type tag taken from the opening line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Info,
    ProgramStatus,
    HostStatus,
    ServiceStatus,
    Other(String),
}

impl BlockKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "info" => BlockKind::Info,
            "programstatus" => BlockKind::ProgramStatus,
            "hoststatus" => BlockKind::HostStatus,
            "servicestatus" => BlockKind::ServiceStatus,
            other => BlockKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BlockKind::Info => "info",
            BlockKind::ProgramStatus => "programstatus",
            BlockKind::HostStatus => "hoststatus",
            BlockKind::ServiceStatus => "servicestatus",
            BlockKind::Other(tag) => tag,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One block as it appeared in the file, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// 0-based position among the emitted blocks; later blocks win on duplicates.
    pub index: usize,
    pub kind: BlockKind,
    /// Lines between the opening and the closing line, untrimmed.
    pub body: Vec<String>,
    /// False for a trailing block that reached end of input without `\t}`.
    pub closed: bool,
}

/// Groups lines into blocks. Strictly sequential: a boundary depends on
/// whether a block is currently open.
///
/// Blocks do not nest; an opening line inside an open block is a body line.
/// A block still open at end of input is returned last with `closed == false`
/// so the aggregator can report it; its body runs to the last line.
pub fn split_blocks<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<RawBlock> {
    let mut blocks = Vec::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut inside = false;

    for line in lines {
        pending.push(line);
        if BLOCK_OPEN.is_match(line) {
            inside = true;
        } else if BLOCK_CLOSE.is_match(line) {
            inside = false;
        }
        if inside {
            continue;
        }
        if !(pending.len() == 1 && pending[0].is_empty()) {
            blocks.push(emit(blocks.len(), &pending, true));
        }
        pending.clear();
    }

    if !pending.is_empty() {
        tracing::debug!(
            operation = "split_blocks",
            lines = pending.len(),
            "unterminated block at end of input"
        );
        blocks.push(emit(blocks.len(), &pending, false));
    }
    blocks
}

fn emit(index: usize, lines: &[&str], closed: bool) -> RawBlock {
    let tag = lines
        .iter()
        .flat_map(|l| l.split_whitespace())
        .next()
        .unwrap_or_default();
    let body = match (lines, closed) {
        ([_, inner @ .., _], true) => inner,
        ([_, rest @ ..], false) => rest,
        _ => &[][..],
    };
    RawBlock {
        index,
        kind: BlockKind::from_tag(tag),
        body: body.iter().map(|l| l.to_string()).collect(),
        closed,
    }
}
