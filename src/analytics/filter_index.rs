//! Tiered filter index: process type -> primary category -> sub-category
//! field/value counts, driving a cascading filter.
//!
//! Rebuilt wholesale from the job snapshot on every call. Job sets are small
//! (hundreds to low thousands), so a full pass beats maintaining an
//! incremental structure.

use std::collections::BTreeMap;

use crate::job::Job;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct FieldNode {
    pub field: String,
    pub values: Vec<ValueCount>,
}

#[derive(Debug, Clone)]
pub struct CategoryNode {
    pub value: String,
    pub count: usize,
    pub fields: Vec<FieldNode>,
}

#[derive(Debug, Clone)]
pub struct ProcessNode {
    pub process_type: String,
    pub job_count: usize,
    pub categories: Vec<CategoryNode>,
}

#[derive(Debug, Default)]
pub struct FilterIndex {
    pub processes: Vec<ProcessNode>,
}

#[derive(Default)]
struct CategoryAcc {
    count: usize,
    // field -> value -> count
    fields: BTreeMap<String, BTreeMap<String, usize>>,
}

#[derive(Default)]
struct ProcessAcc {
    job_count: usize,
    categories: BTreeMap<String, CategoryAcc>,
}

/// Count desc, then value asc, so the dropdown order is stable.
fn sorted_counts(map: BTreeMap<String, usize>) -> Vec<ValueCount> {
    let mut out: Vec<ValueCount> = map
        .into_iter()
        .map(|(value, count)| ValueCount { value, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then(a.value.cmp(&b.value)));
    out
}

/// One full pass over the snapshot. A job counts once per process type it
/// uses, even when it carries several requirements of the same type.
pub fn build_filter_index(jobs: &[Job]) -> FilterIndex {
    let mut accs: BTreeMap<String, ProcessAcc> = BTreeMap::new();

    for job in jobs {
        let mut seen_types: Vec<&str> = Vec::new();
        for req in &job.requirements {
            if req.process_type.is_empty() {
                continue;
            }
            let acc = accs.entry(req.process_type.clone()).or_default();
            if !seen_types.contains(&req.process_type.as_str()) {
                acc.job_count += 1;
                seen_types.push(&req.process_type);
            }

            let Some(category) = req.category.clone() else {
                continue;
            };
            let cat = acc.categories.entry(category).or_default();
            cat.count += 1;
            for field in req.attributes.keys() {
                if let Some(display) = req.attribute(field) {
                    *cat.fields
                        .entry(field.clone())
                        .or_default()
                        .entry(display)
                        .or_default() += 1;
                }
            }
        }
    }

    let mut processes: Vec<ProcessNode> = accs
        .into_iter()
        .map(|(process_type, acc)| {
            let mut categories: Vec<CategoryNode> = acc
                .categories
                .into_iter()
                .map(|(value, cat)| CategoryNode {
                    value,
                    count: cat.count,
                    fields: cat
                        .fields
                        .into_iter()
                        .map(|(field, values)| FieldNode {
                            field,
                            values: sorted_counts(values),
                        })
                        .collect(),
                })
                .collect();
            categories.sort_by(|a, b| b.count.cmp(&a.count).then(a.value.cmp(&b.value)));
            ProcessNode {
                process_type,
                job_count: acc.job_count,
                categories,
            }
        })
        .collect();
    processes.sort_by(|a, b| b.job_count.cmp(&a.job_count).then(a.process_type.cmp(&b.process_type)));

    FilterIndex { processes }
}
