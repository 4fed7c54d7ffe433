//! Result aggregation, range compression, and report rendering
//!
//! Takes the ordered probe outcomes and produces the framed stdout report:
//! consecutive octets collapse into `first-last` ranges and the ranges are
//! laid out in fixed-width columns.

use crate::network::Network;
use crate::probe::ProbeOutcome;

const RULE_HEAVY: &str = "========================================";
const RULE_LIGHT: &str = "----------------------------------------";

const FIELD_WIDTH: usize = 7;
const FIELDS_PER_ROW: usize = 5;

/// Last octets of the scanned block split by liveness, both ascending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub online: Vec<u8>,
    pub offline: Vec<u8>,
}

/// Split ordered outcomes into online and offline octet sequences.
///
/// This is where the typed probe status collapses to a boolean: a tool
/// failure lands in offline exactly like an unanswered ping.
pub fn partition(outcomes: &[ProbeOutcome]) -> Partition {
    let mut online = Vec::new();
    let mut offline = Vec::new();

    for outcome in outcomes {
        if outcome.is_online() {
            online.push(outcome.last_octet());
        } else {
            offline.push(outcome.last_octet());
        }
    }

    Partition { online, offline }
}

/// Compress a strictly ascending sequence into minimal range strings.
///
/// Singletons render bare (`"84"`), runs of two or more render closed
/// (`"93-94"`). Single linear pass; empty input yields no ranges.
pub fn compress_ranges(octets: &[u8]) -> Vec<String> {
    let mut ranges = Vec::new();

    let Some((&head, rest)) = octets.split_first() else {
        return ranges;
    };

    let mut first = head;
    let mut last = head;
    for &octet in rest {
        if octet == last + 1 {
            last = octet;
        } else {
            ranges.push(render_range(first, last));
            first = octet;
            last = octet;
        }
    }
    ranges.push(render_range(first, last));

    ranges
}

fn render_range(first: u8, last: u8) -> String {
    if first == last {
        first.to_string()
    } else {
        format!("{first}-{last}")
    }
}

/// Lay out range strings in fixed-width columns: each field left-justified
/// to 7 characters and pipe-terminated, at most 5 fields per row. Empty
/// input yields an empty string; the `(none)` placeholder is the caller's
/// concern.
pub fn format_table(fields: &[String]) -> String {
    let mut table = String::new();

    for (i, field) in fields.iter().enumerate() {
        if i > 0 && i % FIELDS_PER_ROW == 0 {
            table.push('\n');
        }
        table.push_str(&format!("{:<width$}|", field, width = FIELD_WIDTH));
    }

    table
}

fn table_or_none(octets: &[u8]) -> String {
    if octets.is_empty() {
        "(none)".to_string()
    } else {
        format_table(&compress_ranges(octets))
    }
}

/// Render the full report block for one sweep
pub fn render_report(network: &Network, partition: &Partition) -> String {
    let mut out = String::new();

    out.push_str(RULE_HEAVY);
    out.push('\n');
    out.push_str(&format!(
        "CIDR:\t{}\tRange: {}-{}\n",
        network.cidr(),
        network.first_octet(),
        network.last_octet()
    ));
    out.push_str(RULE_LIGHT);
    out.push('\n');
    out.push_str(&format!("Mask:\t{}\n", network.netmask()));
    if let Some(gateway) = network.gateway() {
        out.push_str(&format!("Gate:\t{gateway}\n"));
    }
    if let Some(broadcast) = network.broadcast() {
        out.push_str(&format!("Broad:\t{broadcast}\n"));
    }
    out.push_str(RULE_HEAVY);
    out.push('\n');

    out.push_str("ONLINE:\n");
    out.push_str(&table_or_none(&partition.online));
    out.push('\n');
    out.push_str(RULE_LIGHT);
    out.push('\n');

    out.push_str("OFFLINE:\n");
    out.push_str(&table_or_none(&partition.offline));
    out.push('\n');
    out.push_str(RULE_HEAVY);

    out
}

/// Render the framed error block for an aborted run
pub fn render_error(reason: &str) -> String {
    format!(
        "{RULE_HEAVY}\nAn error occurred, the network may have been invalid:\n{reason}\n{RULE_HEAVY}"
    )
}
