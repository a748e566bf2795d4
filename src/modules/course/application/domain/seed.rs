use super::entities::Course;

/// Catalog seeded into both the durable store and the in-memory fallback.
pub fn default_catalog() -> Vec<Course> {
    vec![
        Course {
            id: "modern-software".to_string(),
            title: "Modern Software Development".to_string(),
            description: "Master AI-assisted coding, automated testing, and cutting-edge \
                          development workflows with hands-on projects and industry guest speakers."
                .to_string(),
            instructor: "Mihail Eric".to_string(),
            duration: "10 weeks".to_string(),
            units: "3 units".to_string(),
            schedule: "Mon/Fri Lectures".to_string(),
            category: "Development".to_string(),
            price: 29900,
            is_premium: true,
        },
        Course {
            id: "ai-agents".to_string(),
            title: "AI Coding Agents".to_string(),
            description: "Build autonomous coding agents from scratch, understand agent \
                          architecture, and implement advanced human-AI collaboration patterns."
                .to_string(),
            instructor: "Expert Practitioners".to_string(),
            duration: "8 weeks".to_string(),
            units: "2 units".to_string(),
            schedule: "Self-paced".to_string(),
            category: "AI".to_string(),
            price: 19900,
            is_premium: true,
        },
        Course {
            id: "security-testing".to_string(),
            title: "AI Security & Testing".to_string(),
            description: "Advanced AI-powered security analysis, automated vulnerability \
                          detection, and intelligent test suite generation for modern applications."
                .to_string(),
            instructor: "Security Experts".to_string(),
            duration: "6 weeks".to_string(),
            units: "2 units".to_string(),
            schedule: "Weekend Intensive".to_string(),
            category: "Security".to_string(),
            price: 0,
            is_premium: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique() {
        let catalog = default_catalog();
        let ids: HashSet<_> = catalog.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn catalog_has_free_and_paid_courses() {
        let catalog = default_catalog();
        assert!(catalog.iter().any(Course::is_free));
        assert!(catalog.iter().any(|c| !c.is_free()));
    }
}
