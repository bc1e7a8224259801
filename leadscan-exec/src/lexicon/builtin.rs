// Built-in reference word lists
//
// All entries are lowercase. UK trade-company websites are the target corpus,
// so the name lists lean British and the service/location lists name the
// trades and places that most often masquerade as people.

/// Common first names
pub const FIRST_NAMES: &[&str] = &[
    // Male
    "aaron", "adam", "alan", "alex", "alexander", "ali", "andrew", "anthony", "barry",
    "ben", "benjamin", "brian", "callum", "carl", "charlie", "chris", "christopher",
    "colin", "connor", "craig", "dan", "daniel", "darren", "dave", "david", "dean",
    "dennis", "derek", "douglas", "dylan", "edward", "frank", "gareth", "gary",
    "geoffrey", "george", "gordon", "harry", "henry", "hugh", "ian", "jack", "jake",
    "james", "jamie", "jason", "jim", "joe", "john", "jonathan", "joseph", "josh",
    "joshua", "keith", "kenneth", "kevin", "kieran", "kyle", "lee", "lewis", "liam",
    "luke", "malcolm", "mark", "martin", "matt", "matthew", "michael", "mike",
    "mohammed", "muhammad", "nathan", "neil", "nick", "nicholas", "nigel", "oliver",
    "omar", "owen", "patrick", "paul", "pete", "peter", "philip", "raj", "rhys",
    "richard", "rob", "robert", "roger", "ross", "ryan", "sam", "samuel", "scott",
    "sean", "shaun", "simon", "stephen", "steve", "steven", "stuart", "terry",
    "thomas", "tim", "timothy", "tom", "tony", "trevor", "wayne", "william",
    // Female
    "abigail", "alison", "amanda", "amy", "ann", "anna", "anne", "carol", "caroline",
    "catherine", "charlotte", "chloe", "claire", "dawn", "debbie", "deborah", "diane",
    "donna", "elaine", "eleanor", "elizabeth", "ellie", "emily", "emma", "fiona",
    "gemma", "georgia", "gillian", "hannah", "heather", "helen", "holly", "isabel",
    "jackie", "jacqueline", "jade", "jane", "janet", "jennifer", "jenny", "jessica",
    "jill", "joanna", "joanne", "julie", "karen", "kate", "katherine", "katie",
    "kelly", "kim", "laura", "linda", "lisa", "liz", "lorraine", "louise", "lucy",
    "lynn", "margaret", "mary", "megan", "michelle", "molly", "natalie", "nicola",
    "olivia", "patricia", "paula", "pauline", "rachel", "rebecca", "ruth", "sally",
    "samantha", "sandra", "sarah", "sharon", "sophie", "sue", "susan", "tracey",
    "tracy", "vicky", "victoria", "wendy", "zoe",
];

/// Common surnames (Mc/O' forms stored without punctuation or spacing)
pub const SURNAMES: &[&str] = &[
    "adams", "ali", "allen", "anderson", "bailey", "baker", "barker", "barnes",
    "bell", "bennett", "booth", "brown", "burton", "butler", "byrne", "campbell",
    "carter", "chapman", "clark", "clarke", "collins", "cook", "cooper", "davies",
    "davis", "dawson", "dixon", "doyle", "edwards", "ellis", "evans", "fisher",
    "fletcher", "foster", "gibson", "graham", "grant", "gray", "green", "griffiths",
    "hall", "hamilton", "harris", "harrison", "hart", "harvey", "hayes", "hill",
    "holmes", "howard", "hughes", "hunt", "hunter", "hussain", "jackson", "jenkins",
    "johnson", "jones", "kaur", "kelly", "kennedy", "khan", "king", "knight",
    "lawrence", "lee", "lewis", "lloyd", "lowe", "macdonald", "marshall", "martin",
    "mason", "matthews", "mcdonald", "mcgregor", "mcintyre", "mckenzie", "mclean",
    "mcmanus", "miller", "mills", "mitchell", "moore", "morgan", "morris", "murphy",
    "murray", "obrien", "oneill", "owen", "palmer", "parker", "patel", "pearson",
    "powell", "price", "rees", "reid", "richardson", "riley", "roberts", "robinson",
    "rogers", "russell", "saunders", "scott", "shaw", "simpson", "singh", "smith",
    "spencer", "stevens", "stewart", "sullivan", "taylor", "thomas", "thompson",
    "tucker", "turner", "walker", "wallace", "walsh", "ward", "warren", "watson",
    "watts", "webb", "webster", "wheeler", "white", "whitehead", "wilkinson",
    "williams", "williamson", "wilson", "wood", "wright", "yates", "young",
];

/// Boilerplate, navigation, markup and generic business words
///
/// Any candidate containing one of these is rejected outright.
pub const EXCLUSIONS: &[&str] = &[
    // Legal and navigation boilerplate
    "about", "accessibility", "basket", "blog", "book", "cart", "checkout", "click",
    "conditions", "contact", "cookie", "cookies", "copyright", "faq", "faqs",
    "gallery", "home", "login", "menu", "news", "policy", "privacy", "read",
    "register", "reserved", "review", "reviews", "rights", "search", "sitemap",
    "terms", "testimonial", "testimonials", "view",
    // Markup artifacts
    "amp", "class", "css", "div", "href", "html", "http", "https", "javascript",
    "jquery", "nbsp", "span", "wordpress", "www",
    // Generic business phrases
    "accredited", "approved", "business", "certified", "client", "clients",
    "company", "customer", "customers", "family", "free", "group", "guarantee",
    "insured", "limited", "llp", "ltd", "plc", "quote", "quotes", "registered",
    "safe", "service", "services", "team", "trading", "standards",
    // Salutations and pronouns
    "best", "dear", "hello", "kind", "our", "regards", "thank", "thanks", "the",
    "we", "welcome", "wishes", "you", "your",
    // Platforms
    "checkatrade", "facebook", "google", "houzz", "instagram", "linkedin",
    "tiktok", "trustpilot", "twitter", "whatsapp", "yell", "youtube",
    // Calendar words that are not also given names
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    "january", "february", "march", "july", "september", "october", "november",
    "december",
    // Countries
    "england", "scotland", "wales", "uk", "britain", "kingdom",
];

/// Trade/service words that turn a name into a company phrase
pub const SERVICE_TERMS: &[&str] = &[
    "bathrooms", "boiler", "boilers", "builder", "builders", "building", "carpentry",
    "cleaning", "conditioning", "construction", "contractors", "conversions",
    "decorating", "drainage", "driveways", "electric", "electrical", "electrician",
    "engineering", "extensions", "fabrication", "fencing", "flooring", "gardening",
    "glazing", "haulage", "heating", "installation", "installations", "joinery",
    "kitchens", "landscaping", "lettings", "locksmith", "logistics", "maintenance",
    "motors", "painting", "paving", "plastering", "plumber", "plumbers", "plumbing",
    "properties", "property", "refrigeration", "removals", "renewables", "repairs",
    "roofing", "scaffolding", "solar", "solutions", "supplies", "tiling",
    "transport", "ventilation", "welding", "windows",
    // Short terms match whole tokens only
    "gas", "air", "hvac", "care", "pest",
];

/// Place words that turn a name into an address or branch phrase
pub const LOCATION_TERMS: &[&str] = &[
    "aberdeen", "barnsley", "belfast", "birmingham", "blackpool", "bournemouth",
    "bradford", "brighton", "bristol", "cambridge", "canterbury", "cardiff",
    "chelmsford", "cheltenham", "cheshire", "colchester", "cornwall", "coventry",
    "derbyshire", "devon", "doncaster", "dorset", "dundee", "edinburgh", "essex",
    "exeter", "glasgow", "gloucester", "hampshire", "huddersfield", "ipswich",
    "lancashire", "leeds", "leicester", "liverpool", "london", "maidstone",
    "manchester", "middlesbrough", "midlands", "newcastle", "norfolk", "northampton",
    "norwich", "nottingham", "oldham", "oxford", "peterborough", "plymouth",
    "portsmouth", "reading", "rochdale", "rotherham", "salisbury", "sheffield",
    "shrewsbury", "somerset", "southampton", "southend", "stockport", "suffolk",
    "sunderland", "surrey", "sussex", "swansea", "swindon", "wakefield", "watford",
    "wolverhampton", "worcester", "yorkshire",
    // Address and direction words
    "avenue", "borough", "county", "industrial", "street", "northern", "southern",
    "eastern", "western",
    // Short terms match whole tokens only
    "road", "lane", "park", "york", "bath", "north", "south", "east", "west",
];

/// Words near a name that suggest a real person (review language)
pub const REVIEW_CUES: &[&str] = &[
    "arrived", "brilliant", "courteous", "efficient", "excellent", "explained",
    "fantastic", "friendly", "helpful", "kind", "knowledgeable", "polite",
    "professional", "punctual", "recommend", "recommended", "reliable", "thank",
    "thanks", "tidy",
];

/// Mailbox local parts that belong to a role, not a person
pub const GENERIC_MAILBOXES: &[&str] = &[
    "accounts", "admin", "bookings", "booking", "careers", "contact", "enquiries",
    "enquiry", "hello", "help", "hr", "info", "jobs", "mail", "marketing", "noreply",
    "no-reply", "office", "orders", "quotes", "quote", "reception", "sales",
    "service", "support", "team",
];

/// Short or familiar forms and the formal first name they stand for
pub const NICKNAMES: &[(&str, &str)] = &[
    ("andy", "andrew"),
    ("becky", "rebecca"),
    ("bill", "william"),
    ("billy", "william"),
    ("bob", "robert"),
    ("bobby", "robert"),
    ("chris", "christopher"),
    ("dan", "daniel"),
    ("danny", "daniel"),
    ("dave", "david"),
    ("ed", "edward"),
    ("eddie", "edward"),
    ("gaz", "gary"),
    ("jenny", "jennifer"),
    ("jim", "james"),
    ("jimmy", "james"),
    ("joe", "joseph"),
    ("jon", "jonathan"),
    ("kate", "katherine"),
    ("katie", "katherine"),
    ("liz", "elizabeth"),
    ("matt", "matthew"),
    ("mike", "michael"),
    ("mick", "michael"),
    ("nick", "nicholas"),
    ("pete", "peter"),
    ("phil", "philip"),
    ("rob", "robert"),
    ("sam", "samuel"),
    ("steve", "stephen"),
    ("sue", "susan"),
    ("tom", "thomas"),
    ("tommy", "thomas"),
    ("tony", "anthony"),
    ("vicky", "victoria"),
    ("will", "william"),
];

/// Executive-title keywords, decision-makers first
///
/// Classification takes the first keyword found in this order, so
/// "Assistant Manager" is management and "Technical Director" a decision-maker.
pub const DECISION_MAKER_TITLES: &[&str] = &[
    "managing director", "chief executive officer", "chief executive", "ceo", "md",
    "co-owner", "owner", "proprietor", "co-founder", "founder", "director",
    "partner", "chairman", "chairwoman", "president", "principal",
];

pub const MANAGEMENT_TITLES: &[&str] = &[
    "head of", "general manager", "manager", "supervisor", "team leader", "foreman",
    "coordinator",
];

pub const STAFF_TITLES: &[&str] = &[
    "technician", "engineer", "apprentice", "plumber", "electrician", "installer",
    "fitter", "surveyor", "assistant", "administrator", "receptionist",
];
