use anyhow::Result;
use template_share::TemplateRepository;
use template_share_store::TemplateStore;

const MAX_NAME_WIDTH: usize = 35;

pub async fn run(store: &TemplateStore) -> Result<()> {
    let templates = store.list().await?;

    if templates.is_empty() {
        println!("No local templates. Add one with `template-share add`.");
        return Ok(());
    }

    let name_width = templates
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_WIDTH);

    for template in &templates {
        let extension = format!(".{}", template.extension);
        println!(
            "{:<name_width$}  {:<6}  {}",
            template.name, extension, template.description
        );
    }

    println!("\n{} templates", templates.len());
    Ok(())
}
