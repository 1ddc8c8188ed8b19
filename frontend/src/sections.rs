use std::rc::Rc;

pub const ANCHOR_PREFIX: &str = "section-";
pub const CALL_TO_ACTION_ID: u32 = 15;

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub id: u32,
    pub number: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub location: &'static str,
    pub image: &'static str,
    pub headline: &'static str,
    pub subheadline: &'static str,
    pub description: &'static str,
}

impl Section {
    /// DOM id of the section element, e.g. `section-7`.
    pub fn anchor(&self) -> String {
        format!("{}{}", ANCHOR_PREFIX, self.id)
    }

    pub fn href(&self) -> String {
        format!("#{}", self.anchor())
    }

    pub fn slug(&self) -> String {
        slugify(self.name)
    }

    /// Where the "View Details" buttons of a section lead. The closing call to
    /// action has no facility page of its own and points at the about page.
    pub fn detail_url(&self) -> String {
        if self.id == CALL_TO_ACTION_ID {
            return "/about".to_string();
        }
        format!("/projects/{}", self.slug())
    }

    pub fn is_call_to_action(&self) -> bool {
        self.id == CALL_TO_ACTION_ID
    }
}

pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        let c = if c == ' ' || c == '&' { '-' } else { c };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    slug
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryCount {
    pub category: &'static str,
    pub count: usize,
}

/// Ordered, read-only list of the page sections. The position in the list is
/// the section index used for keyboard navigation.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionRegistry {
    sections: Rc<[Section]>,
}

impl SectionRegistry {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections: sections.into() }
    }

    pub fn facility() -> Self {
        Self::new(FACILITY_SECTIONS.to_vec())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Resolves `section-<id>` to an index. The id must be written exactly as
    /// the section renders it, so `section-07` does not match section 7.
    pub fn index_of_anchor(&self, anchor: &str) -> Option<usize> {
        let raw = anchor.strip_prefix(ANCHOR_PREFIX)?;
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.sections.iter().position(|s| s.id.to_string() == raw)
    }

    /// Resolves a URL fragment such as `#section-7`.
    pub fn index_of_fragment(&self, fragment: &str) -> Option<usize> {
        self.index_of_anchor(fragment.strip_prefix('#')?)
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Section> {
        self.sections
            .iter()
            .filter(|s| !s.is_call_to_action())
            .find(|s| s.slug() == slug)
    }

    /// Sections per category in first-appearance order.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts: Vec<CategoryCount> = Vec::new();
        for section in self.sections.iter() {
            match counts.iter_mut().find(|c| c.category == section.category) {
                Some(entry) => entry.count += 1,
                None => counts.push(CategoryCount {
                    category: section.category,
                    count: 1,
                }),
            }
        }
        counts
    }

    pub fn count_in(&self, category: &str) -> usize {
        self.sections.iter().filter(|s| s.category == category).count()
    }

    /// Number of sections across the group's categories.
    pub fn group_count(&self, group: &NavGroup) -> usize {
        self.category_counts()
            .iter()
            .filter(|c| group.categories.contains(&c.category))
            .map(|c| c.count)
            .sum()
    }

    pub fn first_in_group(&self, group: &NavGroup) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| group.categories.contains(&s.category))
    }
}

/// A navigation bar entry covering several section categories.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavGroup {
    pub label: &'static str,
    pub categories: &'static [&'static str],
}

pub const NAV_GROUPS: &[NavGroup] = &[
    NavGroup {
        label: "Sports & Recreation",
        categories: &["Attractions", "Water Sports", "Sports", "Action Sports", "Innovation"],
    },
    NavGroup {
        label: "Wellness & Recovery",
        categories: &["Wellness", "Recovery"],
    },
];

pub const FACILITY_SECTIONS: &[Section] = &[
    Section {
        id: 1,
        number: "001",
        name: "Hero Aerial View",
        category: "Overview",
        location: "Facility Overview",
        image: "/assets/facilities/hero-aerial-view.webp",
        headline: "Welcome to the Future of Global Beach Sport & Wellness Tourism",
        subheadline: "Bali's integrated arena for surf, play, recovery, and community",
        description: "Get a bird's eye view of the entire destination, the perfect first impression that sets the stage for everything this world-class venue has to offer.",
    },
    Section {
        id: 2,
        number: "002",
        name: "Waterpark",
        category: "Attractions",
        location: "Centrepiece Attraction",
        image: "/assets/facilities/waterpark.webp",
        headline: "Bali's most iconic water attraction",
        subheadline: "Fun and adventure for all ages",
        description: "Splash, slide, and float your way through a family-friendly oasis where thrill-seekers and toddlers alike make unforgettable memories.",
    },
    Section {
        id: 3,
        number: "003",
        name: "Dual Surf Machines",
        category: "Water Sports",
        location: "URBNSURF + Recreational Waves",
        image: "/assets/facilities/dual-surf-machines.webp",
        headline: "Ride World-Class Waves in Paradise",
        subheadline: "Two wave systems for every level of surfing",
        description: "Whether it's your first time standing on a board or you're chasing the perfect barrel, our dual surf machines offer waves for every skill level.",
    },
    Section {
        id: 4,
        number: "004",
        name: "Beach Sports Arena",
        category: "Sports",
        location: "Multi-Sport Complex",
        image: "/assets/facilities/beach-sports-arena.webp",
        headline: "Where Sand Meets Skill",
        subheadline: "Bali's first multi-sport beach arena, hosting local and international events",
        description: "Feel the energy of competition in a dynamic arena where sand meets sport, from casual games to global championships.",
    },
    Section {
        id: 5,
        number: "005",
        name: "Racquet Sports Complex",
        category: "Sports",
        location: "Tennis & Padel",
        image: "/assets/facilities/racquet-sports-complex.webp",
        headline: "Elite Courts for Every Passion",
        subheadline: "Designed for athletes, families, and local development",
        description: "Smash, serve, and rally in state-of-the-art courts designed for pros, families, and anyone passionate about racquet sports.",
    },
    Section {
        id: 6,
        number: "006",
        name: "Extreme Sports Zone",
        category: "Action Sports",
        location: "Action Sports",
        image: "/assets/facilities/extreme-sports-zone.webp",
        headline: "Bali's New Hub for Youth and Action Sports",
        subheadline: "Designed for energy, performance, and adrenaline",
        description: "An adrenaline-fueled playground for skaters, bikers, and action lovers ready to push limits and unleash their edge.",
    },
    Section {
        id: 7,
        number: "007",
        name: "Digital Sports",
        category: "Innovation",
        location: "eSports + Mixed Reality Fitness",
        image: "/assets/facilities/digital-sports.webp",
        headline: "Where Gaming and Fitness Collide",
        subheadline: "Innovation meets movement in Bali's first digital sports hub",
        description: "Step into the future with immersive gaming zones and interactive workouts that blend digital play with real-world movement.",
    },
    Section {
        id: 8,
        number: "008",
        name: "Wellness and Fitness",
        category: "Wellness",
        location: "Health & Wellness",
        image: "/assets/facilities/wellness-and-fitness.webp",
        headline: "Mind. Body. Balance.",
        subheadline: "For athletes, tourists, and recovery-focused guests",
        description: "Recenter your mind and body with open-air yoga decks, fitness centers, and nature-connected wellness spaces.",
    },
    Section {
        id: 9,
        number: "009",
        name: "Spa and Recovery Centre",
        category: "Recovery",
        location: "Elite Performance",
        image: "/assets/facilities/spa-and-recovery-centre.webp",
        headline: "Recover. Reset. Recharge.",
        subheadline: "Elite performance facilities for full recovery and wellness",
        description: "Unwind and recharge in a serene environment with massage therapies, ice baths, and elite recovery treatments.",
    },
    Section {
        id: 10,
        number: "010",
        name: "Culinary Experience",
        category: "Dining",
        location: "Dining & Nutrition",
        image: "/assets/facilities/culinary-experience.webp",
        headline: "From Bali's Soil to Your Plate",
        subheadline: "Locally sourced, nutritionally driven food experiences",
        description: "Savor nutrient-rich meals made from fresh, local ingredients, combining delicious flavor with health-conscious living.",
    },
    Section {
        id: 11,
        number: "011",
        name: "Eco-Accommodation",
        category: "Lodging",
        location: "Sustainable Living",
        image: "/assets/facilities/eco-accommodation.webp",
        headline: "Stay Inspired",
        subheadline: "Bespoke sustainable living experiences for every visitor",
        description: "Sleep among the trees or beside the waves in eco-friendly pods, bamboo villas, and sports lodges made for comfort and connection.",
    },
    Section {
        id: 12,
        number: "012",
        name: "Sustainability",
        category: "Environment",
        location: "Green Technology",
        image: "/assets/facilities/sustainability.webp",
        headline: "Built for a Sustainable Tomorrow",
        subheadline: "Ocean water use, solar energy, zero-carbon concrete, local materials",
        description: "Built with the planet in mind, using solar energy, recycled water, and locally made zero-carbon materials to protect our future.",
    },
    Section {
        id: 13,
        number: "013",
        name: "Community Impact",
        category: "Social",
        location: "Local Impact",
        image: "/assets/facilities/community-impact.webp",
        headline: "Investing in People, Not Just Property",
        subheadline: "Over 400 jobs created. Local training. Community led.",
        description: "Empowering local talent through jobs, skills training, and inclusive participation, because real impact starts at home.",
    },
    Section {
        id: 14,
        number: "014",
        name: "Global Partnerships",
        category: "Recognition",
        location: "International Alliances",
        image: "/assets/facilities/global-partnerships.webp",
        headline: "Powered by the World's Most Visionary Brands",
        subheadline: "Backed by sport, tech, and performance leaders",
        description: "Collaborating with the world's most respected names in sport and tech to elevate Bali's global reputation.",
    },
    Section {
        id: 15,
        number: "015",
        name: "Call to Action",
        category: "Contact",
        location: "Project Overview",
        image: "/assets/facilities/call-to-action.webp",
        headline: "This is Not a Resort. It's a Revolution.",
        subheadline: "Contact us to learn more about investment opportunities, view our site plan, or schedule a facility walk-through",
        description: "A breathtaking sunset view that invites you to take the next step: explore, invest, or visit the future of global sport tourism.",
    },
];
