// Copyright 2025 Martin Pool

//! Static catalog of AWS regions and the services whose logs can be browsed.

use std::str::FromStr;

use crate::Error;

/// An AWS region code and its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub code: &'static str,
    pub name: &'static str,
}

#[rustfmt::skip]
pub static AWS_REGIONS: &[Region] = &[
    Region { code: "us-east-1", name: "US East (N. Virginia)" },
    Region { code: "us-east-2", name: "US East (Ohio)" },
    Region { code: "us-west-1", name: "US West (N. California)" },
    Region { code: "us-west-2", name: "US West (Oregon)" },
    Region { code: "af-south-1", name: "Africa (Cape Town)" },
    Region { code: "ap-east-1", name: "Asia Pacific (Hong Kong)" },
    Region { code: "ap-south-1", name: "Asia Pacific (Mumbai)" },
    Region { code: "ap-south-2", name: "Asia Pacific (Hyderabad)" },
    Region { code: "ap-northeast-1", name: "Asia Pacific (Tokyo)" },
    Region { code: "ap-northeast-2", name: "Asia Pacific (Seoul)" },
    Region { code: "ap-northeast-3", name: "Asia Pacific (Osaka)" },
    Region { code: "ap-southeast-1", name: "Asia Pacific (Singapore)" },
    Region { code: "ap-southeast-2", name: "Asia Pacific (Sydney)" },
    Region { code: "ap-southeast-3", name: "Asia Pacific (Jakarta)" },
    Region { code: "ap-southeast-4", name: "Asia Pacific (Melbourne)" },
    Region { code: "ca-central-1", name: "Canada (Central)" },
    Region { code: "ca-west-1", name: "Canada (Calgary)" },
    Region { code: "eu-central-1", name: "Europe (Frankfurt)" },
    Region { code: "eu-central-2", name: "Europe (Zurich)" },
    Region { code: "eu-west-1", name: "Europe (Ireland)" },
    Region { code: "eu-west-2", name: "Europe (London)" },
    Region { code: "eu-west-3", name: "Europe (Paris)" },
    Region { code: "eu-north-1", name: "Europe (Stockholm)" },
    Region { code: "eu-south-1", name: "Europe (Milan)" },
    Region { code: "eu-south-2", name: "Europe (Spain)" },
    Region { code: "me-south-1", name: "Middle East (Bahrain)" },
    Region { code: "me-central-1", name: "Middle East (UAE)" },
    Region { code: "sa-east-1", name: "South America (São Paulo)" },
    Region { code: "il-central-1", name: "Israel (Tel Aviv)" },
];

/// Find a region by its code.
pub fn find_region(code: &str) -> Option<&'static Region> {
    AWS_REGIONS.iter().find(|r| r.code == code)
}

/// Services whose logs cwlens knows how to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Service {
    #[display("Lambda")]
    Lambda,
    #[display("SQS")]
    Sqs,
}

impl Service {
    pub const ALL: [Service; 2] = [Service::Lambda, Service::Sqs];

    /// Short lowercase key, as accepted on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Service::Lambda => "lambda",
            Service::Sqs => "sqs",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Service::Lambda => "AWS Lambda Functions",
            Service::Sqs => "Simple Queue Service",
        }
    }
}

impl FromStr for Service {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .into_iter()
            .find(|service| service.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Argument(format!("Unknown service {s:?}")))
    }
}
