use template_share::{decode_live_bundle, encode_live_bundle, parse_live_group};
use template_share_store::LiveTemplateDir;

const KOTLIN_XML: &str = r#"<templateSet group="kotlin">
  <template name="main" description="main function" value="fun main() { $END$ }" />
</templateSet>"#;

const GO_XML: &str = r#"<templateSet group="go">
  <template name="errcheck" description="if err != nil" value="if err != nil { $END$ }" />
</templateSet>"#;

fn bundle_of(entries: &[(&str, &str)]) -> template_share::LiveBundle {
    let groups: Vec<_> = entries
        .iter()
        .map(|(name, content)| parse_live_group(name, content).unwrap())
        .collect();
    decode_live_bundle(&encode_live_bundle(&groups).unwrap()).unwrap()
}

#[test]
fn scan_of_missing_directory_is_empty() {
    let root = tempfile::tempdir().unwrap();
    let live = LiveTemplateDir::new(root.path().join("templates"));

    let scan = live.scan().unwrap();
    assert!(scan.groups.is_empty());
    assert!(scan.feedback.is_empty());
}

#[test]
fn scan_parses_groups_and_warns_on_broken_files() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("templates");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("kotlin.xml"), KOTLIN_XML).unwrap();
    std::fs::write(dir.join("broken.xml"), "<templateSet").unwrap();
    std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let scan = LiveTemplateDir::new(&dir).scan().unwrap();

    assert_eq!(scan.groups.len(), 1);
    assert_eq!(scan.groups[0].group, "kotlin");
    assert_eq!(scan.groups[0].templates[0].name, "main");
    assert_eq!(scan.feedback.len(), 1);
    assert!(scan.feedback[0].message().contains("broken.xml"));
}

#[test]
fn import_backs_up_existing_definitions_first() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("templates");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("kotlin.xml"), KOTLIN_XML).unwrap();

    let live = LiveTemplateDir::new(&dir);
    let outcome = live.import(&bundle_of(&[("go.xml", GO_XML)])).unwrap();

    let backup = outcome.backup_dir.unwrap();
    assert_eq!(backup, root.path().join("templates.backup"));
    assert_eq!(
        std::fs::read_to_string(backup.join("kotlin.xml")).unwrap(),
        KOTLIN_XML
    );

    // Old definitions are gone, the bundle's files replaced them.
    assert!(!dir.join("kotlin.xml").exists());
    assert_eq!(std::fs::read_to_string(dir.join("go.xml")).unwrap(), GO_XML);
    assert_eq!(outcome.written, vec![dir.join("go.xml")]);
}

#[test]
fn import_into_empty_directory_skips_the_backup() {
    let root = tempfile::tempdir().unwrap();
    let live = LiveTemplateDir::new(root.path().join("templates"));

    let outcome = live.import(&bundle_of(&[("go.xml", GO_XML)])).unwrap();

    assert!(outcome.backup_dir.is_none());
    assert_eq!(outcome.written.len(), 1);

    let scan = live.scan().unwrap();
    assert_eq!(scan.groups.len(), 1);
    assert_eq!(scan.groups[0].group, "go");
}

#[test]
fn reimport_overwrites_a_group_by_file_name() {
    let root = tempfile::tempdir().unwrap();
    let live = LiveTemplateDir::new(root.path().join("templates"));

    live.import(&bundle_of(&[("go.xml", GO_XML)])).unwrap();
    let updated = GO_XML.replace("errcheck", "errwrap");
    live.import(&bundle_of(&[("go.xml", &updated)])).unwrap();

    let scan = live.scan().unwrap();
    assert_eq!(scan.groups.len(), 1);
    assert_eq!(scan.groups[0].templates[0].name, "errwrap");
}
