//! Demo data written to an empty store.
//!
//! Two pipelines of five columns each and thirty leads. Leads 1-20 sit on
//! the sales pipeline, leads 11-30 on the marketing pipeline, so leads 11-20
//! are on both. Attribute picks are derived from the lead index so a reset
//! always produces the same board.

use super::models::{Column, ConnectionStatus, Lead, Pipeline, Settings, Tag, TagColor};
use super::positions::PositionMap;

pub const SALES_PIPELINE: &str = "pipeline1";
pub const MARKETING_PIPELINE: &str = "pipeline2";

const NAMES: [&str; 30] = [
    "John van Rooj",
    "Emma Johnson",
    "Michael Smith",
    "Sophie Williams",
    "David Brown",
    "Olivia Davis",
    "Daniel Miller",
    "Ava Wilson",
    "James Moore",
    "Isabella Taylor",
    "Alexander Anderson",
    "Charlotte Thomas",
    "William Jackson",
    "Amelia White",
    "Benjamin Harris",
    "Mia Martin",
    "Henry Thompson",
    "Emily Garcia",
    "Sebastian Martinez",
    "Ella Robinson",
    "Jack Wright",
    "Grace Hill",
    "Oliver Scott",
    "Chloe Green",
    "Lucas Adams",
    "Lily Baker",
    "Aiden Nelson",
    "Zoe Hall",
    "Luke Allen",
    "Layla Young",
];

const JOB_TITLES: [&str; 10] = [
    "Sales Director",
    "Marketing Manager",
    "CEO",
    "CTO",
    "Product Manager",
    "Software Engineer",
    "HR Director",
    "Finance Manager",
    "Operations Director",
    "Business Analyst",
];

const COMPANIES: [&str; 10] = [
    "Ideo B.V.",
    "TechGiant Inc.",
    "GlobalSoft",
    "Innovate Solutions",
    "NextLevel Corp",
    "FutureTech",
    "DigitalEdge",
    "SmartSystems",
    "CreativeMinds",
    "StrategyPlus",
];

const STATUSES: [ConnectionStatus; 3] = [
    ConnectionStatus::Pending,
    ConnectionStatus::Connected,
    ConnectionStatus::None,
];

pub fn default_settings() -> Settings {
    Settings::default()
}

pub fn default_pipelines() -> Vec<Pipeline> {
    let stages = |names: [&str; 5], first: usize| {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new(format!("col{}", first + i), *name, i as u32))
            .collect::<Vec<_>>()
    };
    vec![
        Pipeline::new(
            SALES_PIPELINE,
            "Sales Pipeline",
            stages(
                ["New Leads", "Contacted", "Responding", "Meeting Scheduled", "Deal"],
                1,
            ),
        ),
        Pipeline::new(
            MARKETING_PIPELINE,
            "Marketing Pipeline",
            stages(["Prospects", "Leads", "MQL", "SQL", "Customer"], 6),
        ),
    ]
}

pub fn default_tags() -> Vec<Tag> {
    vec![
        Tag::new("tag1", "High Priority", TagColor::Red),
        Tag::new("tag2", "Interested", TagColor::Green),
        Tag::new("tag3", "Follow-up", TagColor::Blue),
        Tag::new("tag4", "Cold", TagColor::Purple),
        Tag::new("tag5", "Hot Lead", TagColor::Amber),
    ]
}

pub fn sample_leads() -> Vec<Lead> {
    let tags = default_tags();
    (0..NAMES.len())
        .map(|i| {
            let mut positions = PositionMap::new();
            if i < 20 {
                positions.place(SALES_PIPELINE, format!("col{}", i % 5 + 1));
            }
            if (10..30).contains(&i) {
                positions.place(MARKETING_PIPELINE, format!("col{}", (i - 10) % 5 + 6));
            }

            let tag_count = i % 3 + 1;
            let lead_tags = (0..tag_count)
                .map(|k| tags[(i + k * 2) % tags.len()].clone())
                .collect();

            Lead {
                id: format!("lead{}", i + 1),
                name: NAMES[i].to_string(),
                photo_url: "/placeholder.svg".to_string(),
                job_title: JOB_TITLES[(i * 3) % JOB_TITLES.len()].to_string(),
                company: COMPANIES[(i * 7) % COMPANIES.len()].to_string(),
                tags: lead_tags,
                connection_status: STATUSES[i % STATUSES.len()],
                pipeline_positions: positions,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ordering::is_dense;

    #[test]
    fn test_default_pipelines_are_dense() {
        let pipelines = default_pipelines();
        assert_eq!(pipelines.len(), 2);
        for p in &pipelines {
            assert_eq!(p.columns.len(), 5);
            assert!(is_dense(&p.columns));
        }
        assert_eq!(pipelines[1].columns[0].id, "col6");
    }

    #[test]
    fn test_sample_leads_distribution() {
        let leads = sample_leads();
        assert_eq!(leads.len(), 30);
        let in_sales = leads
            .iter()
            .filter(|l| l.pipeline_positions.contains(SALES_PIPELINE))
            .count();
        let in_both = leads
            .iter()
            .filter(|l| {
                l.pipeline_positions.contains(SALES_PIPELINE)
                    && l.pipeline_positions.contains(MARKETING_PIPELINE)
            })
            .count();
        assert_eq!(in_sales, 20);
        assert_eq!(in_both, 10);
        assert_eq!(leads[0].column_in(SALES_PIPELINE), Some("col1"));
        assert_eq!(leads[10].column_in(MARKETING_PIPELINE), Some("col6"));
    }

    #[test]
    fn test_sample_leads_are_deterministic_with_distinct_tags() {
        assert_eq!(sample_leads(), sample_leads());
        for lead in sample_leads() {
            let mut ids: Vec<&str> = lead.tags.iter().map(|t| t.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), lead.tags.len());
        }
    }
}
