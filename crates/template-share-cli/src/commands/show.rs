use anyhow::{Result, bail};
use template_share_store::TemplateStore;

pub fn run(store: &TemplateStore, name: &str) -> Result<()> {
    let Some(template) = store.get(name)? else {
        bail!("no template named {name}");
    };

    println!("Name:        {}", template.name);
    println!("Extension:   {}", template.extension);
    if !template.file_name.is_empty() {
        println!("File name:   {}", template.file_name);
    }
    if !template.description.is_empty() {
        println!("Description: {}", template.description);
    }
    println!("Reformat:    {}", template.reformat);
    println!("Live:        {}", template.live_template_enabled);
    println!();
    print!("{}", template.body);
    Ok(())
}
