//! Suggested prompts offered alongside the chat.
//!
//! Static and ordered; selecting one submits it exactly like typed text.

/// The suggestion catalog, in display order.
pub const SUGGESTIONS: [&str; 46] = [
    "Hazme sentir acompañado 💛",
    "Cuéntame un cuento corto y divertido",
    "¿Puedes contarme una historia de amor?",
    "¿Qué noticias bonitas han pasado hoy?",
    "Dime un dato curioso del mundo",
    "Cuéntame una historia de animales",
    "Hazme reír con un chiste",
    "Recomiéndame una película bonita",
    "Dime una frase motivadora",
    "Cuéntame una historia antigua",
    "Dime una receta fácil y sabrosa",
    "Háblame de un país lejano",
    "Cuéntame algo sobre el espacio",
    "Dime un poema corto",
    "Recomiéndame un pasatiempo tranquilo",
    "Dime algo positivo de la vida",
    "Recuérdame un refrán sabio",
    "Cuéntame una historia de fantasía",
    "Háblame de la naturaleza",
    "Cuéntame algo sobre la música",
    "Dime una adivinanza",
    "Cuéntame sobre un invento curioso",
    "Háblame de un personaje famoso",
    "Dime un cuento para dormir",
    "Cuéntame un recuerdo feliz",
    "Dime una cita célebre inspiradora ✨",
    "Dame un consejo para sentirme mejor 💌",
    "Recomiéndame un libro bonito 📖",
    "Dime un dato curioso sobre el cuerpo humano 🧠",
    "Cuéntame una leyenda mitológica 🧚",
    "Háblame de una tradición bonita de algún país 🌎",
    "Dime una curiosidad sobre los gatos 🐱",
    "Cuéntame una historia graciosa de animales 😂",
    "Dame un reto pequeño para hoy 💪",
    "Cuéntame algo que te haga sonreír 😄",
    "Descríbeme un día perfecto 🌞",
    "Hazme imaginar un lugar relajante 🌴",
    "Dime algo que motive a seguir adelante 💖",
    "Cuéntame una anécdota histórica 🏛️",
    "Dime algo sobre el océano 🌊",
    "Cuéntame una curiosidad sobre el espacio 🚀",
    "Dame una idea creativa para hoy 🎨",
    "Hazme imaginar un momento mágico ✨",
    "Cuéntame algo que huela delicioso 🍪",
    "Recomiéndame una canción tranquila 🎵",
    "Dime un nombre bonito y su significado 🌸",
];

/// Prompt at zero-based `index`.
pub fn get(index: usize) -> Option<&'static str> {
    SUGGESTIONS.get(index).copied()
}

pub fn len() -> usize {
    SUGGESTIONS.len()
}

/// Iterate `(one_based_number, prompt)` pairs for display.
pub fn numbered() -> impl Iterator<Item = (usize, &'static str)> {
    SUGGESTIONS.iter().copied().enumerate().map(|(i, p)| (i + 1, p))
}
