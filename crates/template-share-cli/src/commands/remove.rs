use anyhow::Result;
use template_share::TemplateRepository;
use template_share_store::TemplateStore;

pub async fn run(store: &TemplateStore, name: &str) -> Result<()> {
    store.remove(name).await?;
    println!("Removed template {name}");
    Ok(())
}
