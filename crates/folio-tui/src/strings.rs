use folio_schema::Language;

/// Every user-facing string, keyed for both languages. Views never embed
/// literals; they go through `text` so the language toggle reaches
/// everything at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    NavHome,
    NavAbout,
    NavSkills,
    NavProjects,
    NavContact,
    HomeIntro,
    AboutTitle,
    AboutTagline,
    AboutWhoIAm,
    AboutWhoIAmText,
    AboutVisits,
    SkillsTitle,
    SkillsTagline,
    LevelBasic,
    LevelIntermediate,
    LevelAdvanced,
    ProjectsTitle,
    ProjectsTagline,
    ViewProject,
    NoProjects,
    NoSkills,
    ContactTitle,
    ContactTagline,
    ContactName,
    ContactEmail,
    ContactMessage,
    SendMessage,
    Sending,
    SentOk,
    SendFailed,
    WelcomeUser,
    Logout,
    Loading,
    LoadFailed,
    RetryHint,
}

pub fn text(lang: Language, key: Key) -> &'static str {
    match lang {
        Language::En => english(key),
        Language::Fr => french(key),
    }
}

fn english(key: Key) -> &'static str {
    match key {
        Key::NavHome => "Home",
        Key::NavAbout => "About",
        Key::NavSkills => "Skills",
        Key::NavProjects => "Projects",
        Key::NavContact => "Contact",
        Key::HomeIntro => "Hi, I'm",
        Key::AboutTitle => "About Me",
        Key::AboutTagline => "Learn more about my journey and passion for web development.",
        Key::AboutWhoIAm => "Who I Am",
        Key::AboutWhoIAmText => {
            "A passionate developer who loves building efficient, scalable and \
             user-friendly applications, driven by curiosity and a desire to \
             create solutions that make a difference."
        }
        Key::AboutVisits => "About Page Views",
        Key::SkillsTitle => "Skills",
        Key::SkillsTagline => "Technologies I work with",
        Key::LevelBasic => "Basic",
        Key::LevelIntermediate => "Intermediate",
        Key::LevelAdvanced => "Advanced",
        Key::ProjectsTitle => "Projects",
        Key::ProjectsTagline => "Check out my latest work and projects.",
        Key::ViewProject => "View Project",
        Key::NoProjects => "No projects found. Check back soon!",
        Key::NoSkills => "No skills found. Check back soon!",
        Key::ContactTitle => "Contact",
        Key::ContactTagline => "Get in touch with me. I'll get back to you as soon as possible!",
        Key::ContactName => "Your Name",
        Key::ContactEmail => "Your Email",
        Key::ContactMessage => "Your Message...",
        Key::SendMessage => "Send Message",
        Key::Sending => "Sending...",
        Key::SentOk => "Sent Successfully!",
        Key::SendFailed => "Failed - Try Again",
        Key::WelcomeUser => "Welcome",
        Key::Logout => "Logout",
        Key::Loading => "Loading",
        Key::LoadFailed => "This page failed to load",
        Key::RetryHint => "Navigate to the page again to retry.",
    }
}

fn french(key: Key) -> &'static str {
    match key {
        Key::NavHome => "Accueil",
        Key::NavAbout => "À Propos",
        Key::NavSkills => "Compétences",
        Key::NavProjects => "Projets",
        Key::NavContact => "Contact",
        Key::HomeIntro => "Bonjour, je suis",
        Key::AboutTitle => "À Propos de Moi",
        Key::AboutTagline => "Découvrez mon parcours et ma passion pour le développement web.",
        Key::AboutWhoIAm => "Qui Je Suis",
        Key::AboutWhoIAmText => {
            "Un développeur passionné qui aime créer des applications efficaces, \
             évolutives et conviviales, animé par la curiosité et l'envie de \
             construire des solutions utiles."
        }
        Key::AboutVisits => "Vues de la page À Propos",
        Key::SkillsTitle => "Compétences",
        Key::SkillsTagline => "Technologies avec lesquelles je travaille",
        Key::LevelBasic => "Débutant",
        Key::LevelIntermediate => "Intermédiaire",
        Key::LevelAdvanced => "Avancé",
        Key::ProjectsTitle => "Projets",
        Key::ProjectsTagline => "Découvrez mes derniers travaux et projets.",
        Key::ViewProject => "Voir le Projet",
        Key::NoProjects => "Aucun projet trouvé. Revenez bientôt!",
        Key::NoSkills => "Aucune compétence trouvée. Revenez bientôt!",
        Key::ContactTitle => "Contact",
        Key::ContactTagline => "Contactez-moi. Je vous répondrai dès que possible!",
        Key::ContactName => "Votre Nom",
        Key::ContactEmail => "Votre Email",
        Key::ContactMessage => "Votre Message...",
        Key::SendMessage => "Envoyer le Message",
        Key::Sending => "Envoi...",
        Key::SentOk => "Envoyé avec Succès!",
        Key::SendFailed => "Échec - Réessayer",
        Key::WelcomeUser => "Bienvenue",
        Key::Logout => "Déconnexion",
        Key::Loading => "Chargement",
        Key::LoadFailed => "Cette page n'a pas pu se charger",
        Key::RetryHint => "Naviguez à nouveau vers la page pour réessayer.",
    }
}
