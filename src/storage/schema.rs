//! Database schema definitions

/// SQL to create the projects table
pub const CREATE_PROJECTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    path TEXT NOT NULL
)
"#;

/// SQL to create the templates table
pub const CREATE_TEMPLATES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS templates (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL
)
"#;

/// SQL to create the project environment entries table
pub const CREATE_PROJECT_ENVS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS project_envs (
    project_id TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (project_id, key),
    FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
)
"#;

/// SQL to create the template environment entries table
pub const CREATE_TEMPLATE_ENVS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS template_envs (
    template_id TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (template_id, key),
    FOREIGN KEY (template_id) REFERENCES templates(id) ON DELETE CASCADE
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_projects_name ON projects(name)",
    "CREATE INDEX IF NOT EXISTS idx_templates_name ON templates(name)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_PROJECTS_TABLE,
        CREATE_TEMPLATES_TABLE,
        CREATE_PROJECT_ENVS_TABLE,
        CREATE_TEMPLATE_ENVS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
