use crate::{
    cli::{ConsolidateArgs, ConsolidateArgsInner, InputSpec},
    core::graph::BreakpointGraph,
    error::SvfuseError,
    io::{call_writer::CallWriter, readers::open_input_reader},
    utils::util::{format_number_with_commas, Result},
};
use std::{io::BufRead, path::Path};

mod complex;

pub use complex::synthesize_complex_inversions;

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub records_read: usize,
    pub records_skipped: usize,
    pub nodes: usize,
    pub node_merges: usize,
    pub skipped_merges: usize,
    pub reclassified_insertions: usize,
    pub redundant_events: usize,
    pub complex_events: usize,
    pub records_written: usize,
}

impl RunSummary {
    pub fn log(&self) {
        log::info!(
            "Records read: {} ({} skipped)",
            format_number_with_commas(self.records_read),
            format_number_with_commas(self.records_skipped)
        );
        log::info!(
            "Nodes: {} ({} merged, {} merges skipped)",
            format_number_with_commas(self.nodes),
            format_number_with_commas(self.node_merges),
            format_number_with_commas(self.skipped_merges)
        );
        log::info!(
            "Redundant events removed: {}, insertions reclassified: {}, complex events: {}",
            format_number_with_commas(self.redundant_events),
            format_number_with_commas(self.reclassified_insertions),
            format_number_with_commas(self.complex_events)
        );
        log::info!(
            "Records written: {}",
            format_number_with_commas(self.records_written)
        );
    }
}

/// Reads one caller output into `graph`. Malformed records are skipped with a warning
/// unless `strict` is set, in which case the first one aborts the run.
pub fn load_input(
    graph: &mut BreakpointGraph,
    input: &InputSpec,
    strict: bool,
    summary: &mut RunSummary,
) -> Result<()> {
    log::info!("Reading {input}");
    let reader = open_input_reader(&input.path)?;
    let mut record_number = 0;
    let mut loaded = 0usize;
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        if input.format.is_header(&line) {
            continue;
        }
        record_number += 1;
        summary.records_read += 1;
        match input.format.parse_line(&line, record_number) {
            Ok(breakpoint) => {
                graph.add_event(breakpoint.into_event());
                loaded += 1;
            }
            Err(source) => {
                let error = SvfuseError::InputRecord {
                    path: input.path.clone(),
                    line: line_idx + 1,
                    source: Box::new(source),
                };
                if strict {
                    return Err(error);
                }
                log::warn!("{error}, skipping");
                summary.records_skipped += 1;
            }
        }
    }
    log::debug!(
        "Loaded {} events from {}",
        format_number_with_commas(loaded),
        input.path.display()
    );
    Ok(())
}

/// Clusters, merges and simplifies the loaded events in place.
pub fn consolidate_graph(
    graph: &mut BreakpointGraph,
    args: &ConsolidateArgsInner,
    summary: &mut RunSummary,
) -> Result<()> {
    graph.cluster_events();
    summary.nodes = graph.n_nodes();

    let merges = graph.merge_adjacent_nodes(args.max_node_dist);
    summary.node_merges = merges.merged;
    summary.skipped_merges = merges.skipped;
    log::debug!(
        "Merged {} nodes, skipped {} merges",
        merges.merged,
        merges.skipped
    );

    let event_ids: Vec<_> = graph.event_ids().collect();
    for event in event_ids {
        if graph.event_mut(event).reclassify_if_pure_insertion() {
            summary.reclassified_insertions += 1;
        }
    }

    for node in graph.live_nodes_sorted() {
        summary.redundant_events += graph.eliminate_redundant_events(node, args.max_redundant_dist)?;
    }

    if !args.no_complex {
        summary.complex_events = synthesize_complex_inversions(graph)?;
    }
    Ok(())
}

pub fn write_calls(graph: &BreakpointGraph, output: Option<&Path>) -> Result<usize> {
    let mut writer = CallWriter::new(output)?;
    writer.write_header()?;
    for event in graph.surviving_events() {
        writer.write_event(graph.event(event))?;
    }
    writer.finish()
}

pub fn consolidate(args: ConsolidateArgs) -> Result<()> {
    let mut graph = BreakpointGraph::new();
    let mut summary = RunSummary::default();

    for input in &args.inputs {
        load_input(&mut graph, input, args.consolidate_args.strict, &mut summary)?;
    }
    if graph.n_events() == 0 {
        log::warn!("No events were read from the inputs");
    }

    consolidate_graph(&mut graph, &args.consolidate_args, &mut summary)?;
    summary.records_written = write_calls(&graph, args.output.as_deref().map(Path::new))?;
    summary.log();
    Ok(())
}
