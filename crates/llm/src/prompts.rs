//! Prompt Contracts
//!
//! The three prompts sent to the model, in the product's French voice: the
//! strict-JSON completeness check, the full analysis instruction with its
//! rigid section structure and structured-data directives, and the chat
//! system instruction seeded with the live dossier.

use wing_analyst_core::parser::{CHART_DATA_CLOSE, CHART_DATA_OPEN, CHART_MARKER};
use wing_analyst_core::{PilotProfile, WingSelection};

/// Reference catalog of manufacturer sites the model is told to search
/// first for real technical data.
pub const MANUFACTURERS: [(&str, &str); 25] = [
    ("Advance", "https://www.advance.swiss/"),
    ("Ozone", "https://flyozone.com/paragliders/fr"),
    ("Gin Gliders", "https://www.gingliders.com/fr/paragliders/"),
    ("Skywalk", "https://www.skywalk.info/"),
    ("Niviuk", "https://niviuk.com/"),
    ("Nova", "https://www.nova.eu/fr/parapentes/"),
    ("BGD", "https://www.flybgd.com/fr/parapentes/"),
    ("AirDesign", "https://www.ad-gliders.com/"),
    ("Supair", "https://www.supair.com/"),
    ("Sky Paragliders", "https://www.sky-cz.com/"),
    ("Dudek", "https://www.dudek.fr"),
    ("ITV Wings", "https://www.itv-wings.com/"),
    ("Level Wings", "https://levelwings.com/fr/"),
    ("Little Cloud", "https://www.littlecloud.fr"),
    ("Nervures", "https://www.nervures.com/"),
    ("Sol Paragliders", "https://www.solfrance.fr"),
    ("Swing Paragliders", "https://www.swing.de/?lang=fr"),
    ("UP Paragliders", "https://up-paragliders.com/"),
    ("Phi-Air", "https://phi-air.com"),
    ("Icaro", "https://www.icaro-paragliders.com/"),
    ("APCO Aviation", "https://www.apcoaviation.com/"),
    ("Mac Para", "https://www.macpara.com/"),
    ("Independence", "https://www.independence.aero/fr/parapentes/"),
    ("Sky Country", "https://sky-country.com/"),
    ("Neo Paragliders", "https://www.neo-paragliders.fr"),
];

/// Prompt of the profile completeness check. The response must be strict
/// JSON matching [`wing_analyst_core::ProfileCompleteness`].
pub fn completeness_prompt(profile: &PilotProfile) -> String {
    format!(
        "Analyse ce profil de pilote de parapente :\n\
         Expérience: {}\n\
         Ambitions: {}\n\
         PTV: {}kg\n\
         Voile actuelle: {}\n\n\
         Si des informations cruciales manquent pour conseiller une aile \
         (ex: nombre d'heures de vol par an, SIV fait, type de sellette), \
         pose 3 questions max.\n\
         Réponds EXCLUSIVEMENT en JSON : {{ \"isComplete\": boolean, \"questions\": string[] }}",
        profile.experience, profile.ambitions, profile.ptv, profile.current_wing
    )
}

/// The full analysis instruction.
pub fn analysis_prompt(profile: &PilotProfile, selection: &WingSelection) -> String {
    let manufacturers_list = MANUFACTURERS
        .iter()
        .map(|(name, url)| format!("- {name}: {url}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mission = if selection.is_empty() {
        "Le pilote n'a pas d'idée précise. PROPOSE 3 à 4 voiles de progression \
         pertinentes (ex: A, B, High-B type \"EN-B+\"... si le niveau le permet)."
            .to_string()
    } else {
        format!(
            "Analyser spécifiquement ces voiles : {}.",
            selection.wings().join(", ")
        )
    };
    let extra_suggestions = if !selection.is_empty() && selection.include_suggestions {
        "\nEN PLUS des voiles saisies, PROPOSE 1 ou 2 modèles supplémentaires qui \
         seraient extrêmement cohérents selon toi pour ce pilote."
    } else {
        ""
    };

    format!(
        "Rôle : Tu es un expert senior en ingénierie de parapente et instructeur \
(notamment en cross XC).
Ta mission est de produire un dossier technique et pédagogique d'une précision chirurgicale.

BASE DE DONNÉES CONSTRUCTEURS (Utilise PRIORITAIREMENT ces sites pour chercher \
les données techniques réelles via Google Search) :
{manufacturers_list}

PROFIL DU PILOTE :
- Expérience actuelle : {experience}
- Voile de référence : {current_wing}
- PTV (Poids Total Volant) : {ptv} kg
- Pratique : {flight_types}
- Ambitions : {ambitions}

MISSION :
{mission}{extra_suggestions}

---

STRUCTURE DU RAPPORT (RIGOUREUSE) :

## 0. Profil pilote (rappel)
(Synthèse des points clés et analyse critique du setup actuel)

## 1. Voiles étudiées
(Liste exhaustive incluant la voile de référence {current_wing}, les choix du pilote \
et les suggestions de l'IA)

## 2. Données techniques consolidées (tailles pertinentes PTV {ptv} kg)
(Tableau comparatif incluant TOUTES les voiles citées en section 1. Colonnes : \
Modèle, Taille, Allongement, Poids, PTV certifié, Matériaux)

## 3. Analyse approfondie et consolidée par voile
IMPORTANT : Tu DOIS créer une sous-section (3.1, 3.2, etc.) pour CHAQUE voile \
listée en section 1 (Référence + Choix + Suggestions).

### 3.X [Nom du modèle]
#### **Positionnement constructeur :**
(Cible et promesse)
#### **Conception technique :**
(Specs marquantes. DYNAMIQUE DE VOL : Communication via élévateurs/suspentes, \
fermeté commande, tendance tangage)
#### **Retours terrain et essais :**
(Synthèse approfondie : Ziad Bassil / XC Mag / Flybubble / Forums)
#### **Limites objectivement observées :**
(Points faibles documentés)
#### **Conclusion technique :**
(Avis tranché de l'expert)

## 4. Analyse croisée spécifique au profil
IMPORTANT : Analyse l'adéquation de CHAQUE voile listée en section 1 par rapport au pilote.
### 4.X [Nom du modèle]
(Pourquoi ce modèle est (ou n'est pas) adapté à l'expérience et aux ambitions du pilote)
### Résumé de l'analyse croisée :
(Comparaison globale des options)

## 5. Positionnement dans une trajectoire de progression
(Attribution d'un niveau 1, 2 ou 3 selon l'accessibilité réelle pour ce pilote)

## 6. Recommandations Finales
(Choix n°1 prioritaire et alternatives argumentées)
Insère le jeton {chart_marker} SEUL sur sa propre ligne, à l'endroit exact où le \
comparatif graphique des voiles doit apparaître.

## 7. Comparaison immersive : {current_wing} → [Le choix recommandé]
Comparaison immersive : Quelles sensations attendre en passant de la {current_wing} \
à la [Meilleure Voile] ?
### 7.1. Philosophie générale
(Ressenti du pilote)
### 7.2. Gonflage & décollage
### 7.3. Tangage, roulis, information
### 7.4. Thermique
### 7.5. Transition & XC
### 7.6. Sécurité Passive
### 7.7. Conclusion de la comparaison

---

DIRECTIVES D'ANALYSE :
1. Sois extrêmement précis sur les matériaux et la structure interne.
2. Étudie spécifiquement le comportement au TREUIL uniquement si mentionné.
3. Cite tes sources (Forums, Ziad Bassil, XC Mag, etc.).
4. Sécurité : Sois intransigeant si une voile est trop exigeante pour le pilote.
5. N'invente aucune donnée. Si une spec est inconnue, indique-le.

DONNÉES STRUCTURÉES (OBLIGATOIRE) :
Termine ta réponse par un bloc délimité par {chart_open} et {chart_close} contenant \
UNIQUEMENT un JSON de la forme :
{chart_open}
{{\"data\": [{{\"label\": \"Nom du modèle\", \"metrics\": {{\"safety\": 0, \
\"performance\": 0, \"handling\": 0, \"accessibility\": 0, \"speed\": 0}}}}]}}
{chart_close}
Chaque métrique est une note de 0 à 10 (accessibility élevée = voile facile). \
Une entrée par voile étudiée.

Génère un dossier complet et rédigé pour le pilote.
Utilise Google Search pour les données techniques les plus récentes.",
        experience = profile.experience,
        current_wing = profile.current_wing,
        ptv = profile.ptv,
        flight_types = profile.flight_types_label(),
        ambitions = profile.ambitions,
        chart_marker = CHART_MARKER,
        chart_open = CHART_DATA_OPEN,
        chart_close = CHART_DATA_CLOSE,
    )
}

/// System instruction of the follow-up chat, rebuilt from the live editable
/// dossier on every send.
pub fn chat_system_prompt(dossier: &str) -> String {
    format!(
        "Tu es l'expert qui a rédigé ce dossier : {dossier}\n\
         Réponds précisément aux questions techniques du pilote en gardant une \
         rigueur d'ingénieur.\n\
         Met à jour le dossier si l'utilisateur le demande."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wing_analyst_core::FlightType;

    fn test_profile() -> PilotProfile {
        let mut profile = PilotProfile::default();
        profile.experience = "150h de vol, SIV 2023".to_string();
        profile.current_wing = "Ozone Buzz Z6".to_string();
        profile.ptv = 95;
        profile.ambitions = "Premiers 50km de cross".to_string();
        profile.toggle_flight_type(FlightType::CrossCountry);
        profile
    }

    #[test]
    fn test_completeness_prompt_embeds_profile() {
        let prompt = completeness_prompt(&test_profile());
        assert!(prompt.contains("150h de vol, SIV 2023"));
        assert!(prompt.contains("PTV: 95kg"));
        assert!(prompt.contains("Ozone Buzz Z6"));
        assert!(prompt.contains("\"isComplete\""));
    }

    #[test]
    fn test_analysis_prompt_with_wings() {
        let mut selection = WingSelection::default();
        selection.add("Advance Iota DLS");
        selection.add("Alpina 4");
        selection.include_suggestions = false;

        let prompt = analysis_prompt(&test_profile(), &selection);
        assert!(prompt.contains("Analyser spécifiquement ces voiles : Advance Iota DLS, Alpina 4."));
        assert!(!prompt.contains("modèles supplémentaires"));
        assert!(prompt.contains("XC (Cross)"));
        assert!(prompt.contains("- Ozone: https://flyozone.com/paragliders/fr"));
        assert!(prompt.contains(CHART_MARKER));
        assert!(prompt.contains(CHART_DATA_OPEN));
        assert!(prompt.contains(CHART_DATA_CLOSE));
    }

    #[test]
    fn test_analysis_prompt_empty_selection_asks_for_proposals() {
        let selection = WingSelection::default();
        let prompt = analysis_prompt(&test_profile(), &selection);
        assert!(prompt.contains("PROPOSE 3 à 4 voiles de progression"));
        assert!(!prompt.contains("Analyser spécifiquement"));
    }

    #[test]
    fn test_analysis_prompt_suggestion_flag() {
        let mut selection = WingSelection::default();
        selection.add("Epsilon");
        selection.include_suggestions = true;
        let prompt = analysis_prompt(&test_profile(), &selection);
        assert!(prompt.contains("PROPOSE 1 ou 2 modèles supplémentaires"));
    }

    #[test]
    fn test_chat_system_prompt_seeds_dossier() {
        let prompt = chat_system_prompt("## Rapport retravaillé");
        assert!(prompt.contains("## Rapport retravaillé"));
        assert!(prompt.contains("rigueur d'ingénieur"));
    }
}
