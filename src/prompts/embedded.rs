//! Embedded fallback prompts
//!
//! These are compiled into the binary and used when template files are not found.

/// Itinerary request sent to the text generator
///
/// Variables: `num_days`, `travel_type`, `destinations` (comma-joined names).
pub const ITINERARY: &str = r#"Create a detailed {{num_days}}-day itinerary for {{travel_type}} travelers visiting: {{destinations}}.
Structure your response EXACTLY like this format:

### [Destination] Itinerary
**Selected Destinations:** {{destinations}}
**Travel Style:** {{travel_type}} Travel

[Brief overview paragraph about the trip]

---

**Day 1: [Day Title]**
- Morning: [Activity with details]
- Afternoon: [Activity with details]
- Evening: [Activity with details]

**Day 2: [Day Title]**
- Morning: [Activity with details]
- Afternoon: [Activity with details]
- Evening: [Activity with details]

[Continue for all {{num_days}} days...]

---

**Key Recommendations:**
- Best restaurant: [Name] ([Cuisine type])
- Must-try activity: [Activity]
- Hidden gem: [Tip]
- Local insight: [Cultural note]

**Travel Tips:**
- [Transportation advice]
- [Packing suggestion]
- [Budget tip]
"#;

/// Get an embedded template by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "itinerary" => Some(ITINERARY),
        _ => None,
    }
}
