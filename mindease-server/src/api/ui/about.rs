//! About page - static project description

use axum::response::Html;

use super::render_page;

/// Team member shown on the about page
struct TeamMember {
    name: &'static str,
    roll: &'static str,
}

const TEAM_MEMBERS: [TeamMember; 5] = [
    TeamMember { name: "Sonalika Chandra", roll: "2201CS68" },
    TeamMember { name: "Bhavik Netam", roll: "2201CS84" },
    TeamMember { name: "Uday Shrotriya", roll: "2201CS87" },
    TeamMember { name: "Saumya Sinha", roll: "2201CS65" },
    TeamMember { name: "Sahil Kumar", roll: "2201CS60" },
];

/// Team members laid out two per row; an odd last member spans the row
fn team_grid() -> String {
    TEAM_MEMBERS
        .chunks(2)
        .map(|row| {
            let class = if row.len() == 2 { "team-row" } else { "team-row single" };
            let cells: String = row
                .iter()
                .map(|member| {
                    format!(
                        "            <div class=\"team-member\"><p class=\"member-name\">{}</p><p class=\"member-roll\">{}</p></div>\n",
                        member.name, member.roll
                    )
                })
                .collect();
            format!("        <div class=\"{}\">\n{}        </div>\n", class, cells)
        })
        .collect()
}

/// GET /about
pub async fn about_page() -> Html<String> {
    let body = format!(
        r#"        <h1>About MindEase</h1>
        <p>MindEase is our capstone project developed under the Microsoft Hackathon initiative.
        It is an AI-powered wellness assistant designed to help users track their mood and
        provide a responsive medical chatbot for mental well-being.</p>
        <h2>Meet the Team</h2>
        <section class="team-grid">
{}        </section>
"#,
        team_grid()
    );

    Html(render_page("About Us - MindEase", &body, &[]))
}
