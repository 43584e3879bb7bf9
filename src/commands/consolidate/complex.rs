use crate::{
    core::{
        event::{EventId, NodeId, Polarity},
        graph::{BreakpointGraph, ComplexSpec},
        svtype::EventType,
    },
    utils::util::Result,
};

/// Pairs of inversion-1 / inversion-2 events on `node` that reach the same partner node.
fn inversion_pairs(graph: &BreakpointGraph, node: NodeId) -> Vec<(EventId, EventId)> {
    let events = graph.node(node).events();
    let partner = |e: EventId| graph.event(e).other_node(node);
    let of_type = |t: EventType| -> Vec<EventId> {
        events
            .iter()
            .copied()
            .filter(|&e| graph.event(e).event_type == t && partner(e).is_some())
            .collect()
    };

    let mut open_inv2 = of_type(EventType::INVERSION_2);
    let mut pairs = Vec::new();
    for inv1 in of_type(EventType::INVERSION_1) {
        if let Some(idx) = open_inv2.iter().position(|&inv2| partner(inv2) == partner(inv1)) {
            pairs.push((inv1, open_inv2.remove(idx)));
        }
    }
    pairs
}

/// Replaces each matching inversion pair with a single complex inversion hosted at the
/// node it was found on. Returns the number of complex events created.
pub fn synthesize_complex_inversions(graph: &mut BreakpointGraph) -> Result<usize> {
    let mut created = 0;
    for node in graph.live_nodes_sorted() {
        for (inv1, inv2) in inversion_pairs(graph, node) {
            let (a, b) = (graph.event(inv1), graph.event(inv2));
            let c1 = a.c1().min(b.c1()).clone();
            let c2 = a.c2().max(b.c2()).clone();
            graph.detach_event(inv1);
            graph.detach_event(inv2);
            let complex = graph.add_complex_event(ComplexSpec {
                c1,
                c2,
                event_type: EventType::COMPLEX_INVERSION,
                components: vec![inv1, inv2],
                polarity: Polarity::Addition,
                hosting_node: Some(node),
                insertion_point: None,
            })?;
            log::debug!("Assembled {}", graph.event(complex));
            created += 1;
        }
    }
    Ok(created)
}
