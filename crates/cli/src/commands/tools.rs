//! `crewlink tools` — List the registered tools and their schemas.

use super::Session;

pub async fn run(session: Session, schemas: bool) -> Result<(), Box<dyn std::error::Error>> {
    if schemas {
        let definitions = session.registry.definitions();
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    for definition in session.registry.definitions() {
        println!("{:<24}{}", definition.name, definition.description);
    }
    Ok(())
}
