use crate::App;
use crate::args::ListSpec;
use crate::output::{self, Table, mark};
use color_eyre::eyre::Result;
use vimgolf_core::{ListingRow, annotate};
use vimgolf_store::IdLookup;

pub async fn list_command(app: &App, spec: ListSpec) -> Result<()> {
    let entries = match app.client().fetch_listing(spec.page, spec.limit).await {
        Ok(entries) => entries,
        Err(err) => {
            output::error("The challenge list retrieval has failed");
            return Err(err.into());
        }
    };

    let rows = annotate(entries, app.store())?;
    output::plain(listing_table(&rows).render());

    let lookup = IdLookup::from_rows(rows.iter().map(|row| (row.position, row.entry.id.clone())));
    lookup.save(&app.config().paths.id_lookup_path())?;
    tracing::debug!(rows = lookup.len(), "shortcuts saved");
    Ok(())
}

pub fn listing_table(rows: &[ListingRow]) -> Table {
    let mut table = Table::new(["#", "Name", "Entries", "ID", "Played", "Submitted", "Score"]);
    for row in rows {
        table.row([
            format!("+{}", row.position),
            row.entry.name.clone(),
            row.entry
                .entries
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
            row.entry.id.to_string(),
            mark(row.played).to_string(),
            mark(row.submitted).to_string(),
            row.best_score
                .map_or_else(|| "-".to_string(), |score| score.to_string()),
        ]);
    }
    table
}
