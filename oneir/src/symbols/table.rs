//! The built-in symbol dictionary, grouped the way it is presented to users.

pub(super) const BUILTIN: &[(&str, &str)] = &[
    // Animals
    ("snake", "Transformation, healing, or hidden threats"),
    ("spider", "Creativity, patience, or feeling trapped"),
    ("dog", "Loyalty, protection, or friendship"),
    ("cat", "Independence, mystery, or feminine energy"),
    ("bird", "Freedom, perspective, or spiritual messages"),
    ("fish", "Emotions, intuition, or abundance"),
    ("wolf", "Instinct, intelligence, or freedom"),
    ("bear", "Strength, introspection, or healing"),
    ("butterfly", "Transformation, change, or rebirth"),
    // Nature
    ("water", "Emotions, subconscious, or purification"),
    ("fire", "Passion, destruction, or transformation"),
    ("tree", "Growth, strength, or family roots"),
    ("mountain", "Obstacles, goals, or achievement"),
    ("ocean", "Deep emotions, the unconscious mind"),
    ("storm", "Turmoil, emotional release, or change"),
    ("rain", "Renewal, cleansing, or sadness"),
    ("sun", "Vitality, energy, or enlightenment"),
    ("moon", "Intuition, the subconscious, or feminine energy"),
    ("forest", "The unknown, exploration, or the unconscious"),
    // Objects
    ("house", "The self, different aspects of personality"),
    ("car", "Direction in life or personal control"),
    ("key", "Solutions, opportunities, or hidden knowledge"),
    ("door", "Opportunities, transitions, or new beginnings"),
    ("mirror", "Self-reflection, truth, or self-image"),
    ("money", "Self-worth, value, or resources"),
    ("phone", "Communication, connection, or missed opportunities"),
    // Actions
    ("flying", "Freedom, escape, or ambition"),
    ("falling", "Loss of control, insecurity, or anxiety"),
    ("running", "Avoidance, pursuit, or desire to escape"),
    ("fighting", "Inner conflict, struggle, or resistance"),
    ("chasing", "Avoiding an issue or pursuing a goal"),
    // Body parts
    ("teeth", "Anxiety, self-image, or communication"),
    ("hair", "Strength, virility, or personal power"),
    ("eyes", "Perception, awareness, or truth"),
    ("hands", "Action, capability, or personal power"),
    ("feet", "Stability, foundation, or life direction"),
    // Colors
    ("red", "Passion, anger, or energy"),
    ("blue", "Calm, peace, or communication"),
    ("green", "Growth, healing, or nature"),
    ("black", "Mystery, the unknown, or fear"),
    ("white", "Purity, new beginnings, or clarity"),
    ("yellow", "Happiness, intellect, or energy"),
    ("purple", "Spirituality, wisdom, or luxury"),
];
