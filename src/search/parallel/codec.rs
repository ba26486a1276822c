//! Byte encoding of the frames exchanged between coordinator and workers
//!
//! All integers are little-endian. Layouts:
//!
//! - graph: `u32 n`, `u32 m`, then `m` times `u32 u`, `u32 v`, `u64 weight`
//! - state: `u32 n`, `n` color bytes, `u32 edge_index`, `u32 used_edges`,
//!   `u64 cost`, `u64 processed_weight`
//! - report: `u64` expanded, pruned, leaves, improvements, then a presence
//!   byte (`0` empty, `1` state follows) and the optional state record
//!
//! States are decoded against the already-transmitted graph and rejected when
//! they could not have been produced by a search over it.

use crate::error::CodecError;
use crate::graph::{Edge, Graph};
use crate::search::config::Algorithm;
use crate::search::result::SearchStatistics;
use crate::search::state::{Color, SearchState};

const REPORT_EMPTY: u8 = 0x00;
const REPORT_STATE: u8 = 0x01;

/// Outcome of one worker task
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Best connected leaf found in the task, if it improved the local bound
    pub best: Option<SearchState>,
    /// Counters for the task
    pub statistics: SearchStatistics,
}

pub fn encode_graph(graph: &Graph) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + graph.edge_count() * 16);
    put_u32(&mut out, graph.vertex_count());
    put_u32(&mut out, graph.edge_count());
    for edge in graph.edges() {
        put_u32(&mut out, edge.u);
        put_u32(&mut out, edge.v);
        out.extend_from_slice(&edge.weight.to_le_bytes());
    }
    out
}

pub fn decode_graph(bytes: &[u8]) -> Result<Graph, CodecError> {
    let mut reader = WireReader::new(bytes);
    let n = reader.read_u32()? as usize;
    let m = reader.read_u32()? as usize;
    let mut edges = Vec::with_capacity(m.min(bytes.len() / 16));
    for _ in 0..m {
        let u = reader.read_u32()? as usize;
        let v = reader.read_u32()? as usize;
        let weight = reader.read_u64()?;
        edges.push(Edge::new(u, v, weight));
    }
    reader.finish()?;
    Ok(Graph::new(n, edges)?)
}

pub fn encode_state(state: &SearchState) -> Vec<u8> {
    let mut out = Vec::with_capacity(28 + state.colors.len());
    write_state(&mut out, state);
    out
}

pub fn decode_state(bytes: &[u8], graph: &Graph) -> Result<SearchState, CodecError> {
    let mut reader = WireReader::new(bytes);
    let state = read_state(&mut reader, graph)?;
    reader.finish()?;
    Ok(state)
}

pub fn encode_report(report: &Report) -> Vec<u8> {
    let mut out = Vec::with_capacity(33);
    let stats = &report.statistics;
    for counter in [
        stats.nodes_expanded,
        stats.nodes_pruned,
        stats.leaves_reached,
        stats.improvements_found,
    ] {
        out.extend_from_slice(&counter.to_le_bytes());
    }
    match &report.best {
        Some(state) => {
            out.push(REPORT_STATE);
            write_state(&mut out, state);
        }
        None => out.push(REPORT_EMPTY),
    }
    out
}

pub fn decode_report(bytes: &[u8], graph: &Graph) -> Result<Report, CodecError> {
    let mut reader = WireReader::new(bytes);
    let mut statistics = SearchStatistics::new(Algorithm::TaskParallel);
    statistics.nodes_expanded = reader.read_u64()?;
    statistics.nodes_pruned = reader.read_u64()?;
    statistics.leaves_reached = reader.read_u64()?;
    statistics.improvements_found = reader.read_u64()?;
    let best = match reader.read_u8()? {
        REPORT_EMPTY => None,
        REPORT_STATE => Some(read_state(&mut reader, graph)?),
        tag => return Err(CodecError::UnknownTag(tag)),
    };
    reader.finish()?;
    Ok(Report { best, statistics })
}

fn put_u32(out: &mut Vec<u8>, value: usize) {
    out.extend_from_slice(&(value as u32).to_le_bytes());
}

fn write_state(out: &mut Vec<u8>, state: &SearchState) {
    put_u32(out, state.colors.len());
    out.extend(state.colors.iter().map(|c| *c as u8));
    put_u32(out, state.edge_index);
    put_u32(out, state.used_edges);
    out.extend_from_slice(&state.cost.to_le_bytes());
    out.extend_from_slice(&state.processed_weight.to_le_bytes());
}

fn read_state(reader: &mut WireReader<'_>, graph: &Graph) -> Result<SearchState, CodecError> {
    let n = reader.read_u32()? as usize;
    if n != graph.vertex_count() {
        return Err(CodecError::GraphMismatch(format!(
            "state has {} vertices, graph has {}",
            n,
            graph.vertex_count()
        )));
    }
    let colors = reader
        .take(n)?
        .iter()
        .map(|&b| Color::from_byte(b).ok_or(CodecError::InvalidColor(b)))
        .collect::<Result<Vec<_>, _>>()?;
    let edge_index = reader.read_u32()? as usize;
    let used_edges = reader.read_u32()? as usize;
    let cost = reader.read_u64()?;
    let processed_weight = reader.read_u64()?;

    if edge_index > graph.edge_count() {
        return Err(CodecError::GraphMismatch(format!(
            "edge cursor {} past {} edges",
            edge_index,
            graph.edge_count()
        )));
    }
    if used_edges > edge_index {
        return Err(CodecError::GraphMismatch(format!(
            "{} edges used out of {} decided",
            used_edges, edge_index
        )));
    }
    if cost > processed_weight || processed_weight > graph.total_weight() {
        return Err(CodecError::GraphMismatch(format!(
            "cost {} / processed weight {} exceed graph weight {}",
            cost,
            processed_weight,
            graph.total_weight()
        )));
    }

    Ok(SearchState {
        edge_index,
        colors,
        used_edges,
        cost,
        processed_weight,
    })
}

/// Cursor over a received frame
struct WireReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let available = self.bytes.len() - self.offset;
        if len > available {
            return Err(CodecError::Truncated {
                offset: self.offset,
                needed: len - available,
            });
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32, CodecError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(buf))
    }

    fn read_u64(&mut self) -> Result<u64, CodecError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(buf))
    }

    fn finish(self) -> Result<(), CodecError> {
        match self.bytes.len() - self.offset {
            0 => Ok(()),
            extra => Err(CodecError::TrailingBytes(extra)),
        }
    }
}
