use tabled::settings::Style;
use tabled::settings::merge::Merge;
use tabled::{Table, Tabled};

use crate::model::Rankings;

#[derive(Debug, Tabled)]
struct FormRow {
    #[tabled(rename = "Position")]
    position: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Form")]
    form: String,
    #[tabled(rename = "Transfers in")]
    transfers_in: i64,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "FDR")]
    fdr: String,
}

fn rows(rankings: &Rankings) -> Vec<FormRow> {
    rankings
        .iter()
        .flat_map(|(position, players)| {
            players.iter().map(move |p| FormRow {
                position: position.plural_label(),
                name: p.display_name.clone(),
                form: format!("{:.1}", p.form),
                transfers_in: p.transfers_in,
                team: p.team.short_name.clone(),
                fdr: p.fdr_summary(),
            })
        })
        .collect()
}

pub fn render(rankings: &Rankings) -> String {
    let mut table = Table::new(rows(rankings));
    table.with(Style::modern()).with(Merge::vertical());
    table.to_string()
}
