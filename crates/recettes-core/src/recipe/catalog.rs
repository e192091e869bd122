//! Built-in catalog: ten West, North, East and Southern African dishes.

use super::Recipe;

fn recipe(name: &str, country: &str, ingredients: &[&str], steps: &[&str], image_url: &str) -> Recipe {
    Recipe {
        name: name.to_string(),
        country: country.to_string(),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
        image_url: Some(image_url.to_string()),
    }
}

pub(super) fn builtin_recipes() -> Vec<Recipe> {
    vec![
        recipe(
            "Thieboudienne",
            "Sénégal",
            &[
                "Riz",
                "Poisson (grouper ou similaire)",
                "Tomates",
                "Oignons",
                "Huile",
                "Carottes",
                "Chou",
            ],
            &[
                "Préparer la sauce tomate et faire cuire le poisson.",
                "Faire mijoter les légumes dans la sauce.",
                "Ajouter le riz et cuire jusqu'à absorption.",
            ],
            "https://upload.wikimedia.org/wikipedia/commons/3/30/Ceebu_jenn_-_thiebou_djenn.jpg",
        ),
        recipe(
            "Yassa au poulet",
            "Sénégal",
            &["Poulet", "Oignons", "Citron", "Moutarde", "Huile", "Piment (facultatif)"],
            &[
                "Mariner le poulet au citron et oignons.",
                "Faire dorer puis mijoter jusqu'à tendreté.",
            ],
            "https://upload.wikimedia.org/wikipedia/commons/1/16/Poulet_yassa.jpg",
        ),
        recipe(
            "Mafé",
            "Mali / Sénégal",
            &["Viande ou poulet", "Beurre de cacahuète", "Tomates", "Oignons", "Légumes"],
            &[
                "Préparer la sauce à la cacahuète.",
                "Cuire la viande puis mijoter dans la sauce.",
                "Servir avec du riz.",
            ],
            "https://upload.wikimedia.org/wikipedia/commons/6/66/Mafe.jpg",
        ),
        recipe(
            "Attiéké",
            "Côte d'Ivoire",
            &["Attiéké (manioc)", "Poisson ou viande", "Légumes", "Tomates"],
            &[
                "Réchauffer l'attiéké à la vapeur.",
                "Servir avec poisson frit et salade.",
            ],
            "https://upload.wikimedia.org/wikipedia/commons/1/18/Attieke.jpg",
        ),
        recipe(
            "Jollof Rice",
            "Afrique de l'Ouest",
            &["Riz", "Tomates", "Oignons", "Épices", "Huile"],
            &[
                "Préparer une base tomate-épicée.",
                "Cuire le riz dans la sauce jusqu'à absorption.",
            ],
            "https://upload.wikimedia.org/wikipedia/commons/8/8b/Jollof_rice_and_chicken.jpg",
        ),
        recipe(
            "Egusi",
            "Nigeria",
            &["Farine d'egusi (graines)", "Légumes feuille", "Viande ou poisson", "Huile"],
            &["Préparer la pâte d'egusi.", "Cuire avec légumes et protéines."],
            "https://upload.wikimedia.org/wikipedia/commons/4/49/Egusi_Soup.jpg",
        ),
        recipe(
            "Tagine d'agneau",
            "Maroc",
            &["Agneau", "Épices (ras el hanout)", "Fruits secs", "Légumes"],
            &[
                "Saisir la viande, ajouter épices et liquide.",
                "Mijoter lentement jusqu'à tendreté.",
            ],
            "https://upload.wikimedia.org/wikipedia/commons/2/28/Tagine.jpg",
        ),
        recipe(
            "Bunny Chow",
            "Afrique du Sud",
            &["Pain troué", "Curry (agneau ou légumes)", "Épices"],
            &["Faire un curry épais.", "Remplir un pain évidé avec le curry."],
            "https://upload.wikimedia.org/wikipedia/commons/b/bb/Bunny_chow.jpg",
        ),
        recipe(
            "Doro Wat",
            "Éthiopie",
            &["Poulet", "Berbere (épice)", "Oignons", "Beurre clarifié"],
            &[
                "Cuire longuement les oignons lentement.",
                "Ajouter poulet et berbere, mijoter.",
            ],
            "https://upload.wikimedia.org/wikipedia/commons/9/9b/Doro_wat.jpg",
        ),
        recipe(
            "Koshary",
            "Égypte",
            &["Riz", "Lentilles", "Pâtes", "Sauce tomate", "Crispy onions"],
            &[
                "Cuire séparément riz, lentilles et pâtes.",
                "Assembler avec sauce tomate et oignons frits.",
            ],
            "https://upload.wikimedia.org/wikipedia/commons/1/11/Koshary.jpg",
        ),
    ]
}
