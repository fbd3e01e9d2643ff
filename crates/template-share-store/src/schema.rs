use rusqlite_migration::{M, Migrations};

pub fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(
        "CREATE TABLE file_templates (
            name                    TEXT PRIMARY KEY,
            extension               TEXT NOT NULL,
            file_name               TEXT NOT NULL DEFAULT '',
            description             TEXT NOT NULL DEFAULT '',
            body                    TEXT NOT NULL,
            reformat                INTEGER NOT NULL DEFAULT 1,
            live_template_enabled   INTEGER NOT NULL DEFAULT 0
        );",
    )])
}
