use colored::Colorize;
use tandem_application::TandemApp;

pub fn list(app: &TandemApp, query: &str) {
    let partners = app.partners().search(query);
    if partners.is_empty() {
        println!("{}", "No partners found".yellow());
        return;
    }

    for partner in partners {
        println!(
            "{} {} {}",
            format!("[{}]", partner.initials()).cyan(),
            partner.name.bold(),
            format!("(id {})", partner.id).dimmed()
        );
        println!(
            "    Native: {}  Learning: {}  Rating: {:.1}  Available: {}",
            partner.native_language,
            partner.learning_language,
            partner.rating,
            partner.availability
        );
    }
}
