//! Sample TransXChange documents shared by the tests.

use crate::database::memory::MemoryStore;
use crate::database::store::TrackPoint;

/// One operator with a service, three journey patterns (two of which share a
/// section set), route geometry and vehicle journeys; plus a licensed operator
/// without services.
pub const EXTENDED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TransXChange xmlns="http://www.transxchange.org.uk/" xml:lang="en" SchemaVersion="2.4" FileName="SVCS1.xml">
    <RouteSections>
        <RouteSection id="RS1">
            <RouteLink id="RL1">
                <From><StopPointRef>010000001</StopPointRef></From>
                <To><StopPointRef>010000002</StopPointRef></To>
                <Track>
                    <Mapping>
                        <Location id="LOC1">
                            <Longitude>-9.0</Longitude>
                            <Latitude>59.0</Latitude>
                            <Translation>
                                <Longitude>-1.0</Longitude>
                                <Latitude>51.0</Latitude>
                            </Translation>
                        </Location>
                        <Location id="LOC2">
                            <Translation>
                                <Longitude>-1.1</Longitude>
                                <Latitude>51.1</Latitude>
                            </Translation>
                        </Location>
                    </Mapping>
                </Track>
            </RouteLink>
            <RouteLink id="RL2">
                <From><StopPointRef>010000002</StopPointRef></From>
                <To><StopPointRef>010000003</StopPointRef></To>
                <Track>
                    <Mapping>
                        <Location id="LOC3">
                            <Longitude>-1.1</Longitude>
                            <Latitude>51.1</Latitude>
                        </Location>
                        <Location id="LOC4">
                            <Longitude>-1.2</Longitude>
                            <Latitude>51.2</Latitude>
                        </Location>
                    </Mapping>
                </Track>
            </RouteLink>
        </RouteSection>
    </RouteSections>
    <Routes>
        <Route id="R1">
            <Description>Town - Village</Description>
            <RouteSectionRef>RS1</RouteSectionRef>
        </Route>
    </Routes>
    <JourneyPatternSections>
        <JourneyPatternSection id="JPS1">
            <JourneyPatternTimingLink id="JPTL1">
                <From SequenceNumber="1">
                    <StopPointRef>010000001</StopPointRef>
                    <TimingStatus>PTP</TimingStatus>
                </From>
                <To SequenceNumber="2">
                    <StopPointRef>010000002</StopPointRef>
                    <TimingStatus>OTH</TimingStatus>
                </To>
                <RouteLinkRef>RL1</RouteLinkRef>
                <RunTime>PT2M</RunTime>
            </JourneyPatternTimingLink>
            <JourneyPatternTimingLink id="JPTL2">
                <From SequenceNumber="2">
                    <StopPointRef>010000002</StopPointRef>
                    <TimingStatus>OTH</TimingStatus>
                </From>
                <To SequenceNumber="3">
                    <StopPointRef>010000003</StopPointRef>
                    <TimingStatus>PTP</TimingStatus>
                </To>
                <RouteLinkRef>RL2</RouteLinkRef>
                <RunTime>PT3M</RunTime>
            </JourneyPatternTimingLink>
        </JourneyPatternSection>
        <JourneyPatternSection id="JPS2">
            <JourneyPatternTimingLink id="JPTL3">
                <From SequenceNumber="3">
                    <StopPointRef>010000003</StopPointRef>
                </From>
                <To SequenceNumber="4">
                    <StopPointRef>010000004</StopPointRef>
                </To>
                <RunTime>PT4M</RunTime>
            </JourneyPatternTimingLink>
        </JourneyPatternSection>
        <JourneyPatternSection id="JPS3">
            <JourneyPatternTimingLink id="JPTL4">
                <From SequenceNumber="1">
                    <StopPointRef>010000001</StopPointRef>
                </From>
                <To SequenceNumber="2">
                    <StopPointRef>010000002</StopPointRef>
                </To>
                <RouteLinkRef>RL1</RouteLinkRef>
                <RunTime>PT2M</RunTime>
            </JourneyPatternTimingLink>
            <JourneyPatternTimingLink id="JPTL5">
                <From SequenceNumber="2">
                    <StopPointRef>010000002</StopPointRef>
                </From>
                <To SequenceNumber="3">
                    <StopPointRef>010000003</StopPointRef>
                </To>
                <RouteLinkRef>RL2</RouteLinkRef>
                <RunTime>PT3M</RunTime>
            </JourneyPatternTimingLink>
            <JourneyPatternTimingLink id="JPTL6">
                <From SequenceNumber="3">
                    <StopPointRef>010000003</StopPointRef>
                </From>
                <To SequenceNumber="4">
                    <StopPointRef>010000004</StopPointRef>
                </To>
                <RunTime>PT4M</RunTime>
            </JourneyPatternTimingLink>
        </JourneyPatternSection>
    </JourneyPatternSections>
    <Operators>
        <Operator id="O1">
            <NationalOperatorCode>ABCD</NationalOperatorCode>
            <OperatorShortName>Test Buses</OperatorShortName>
        </Operator>
        <LicensedOperator id="O2">
            <NationalOperatorCode>WXYZ</NationalOperatorCode>
            <OperatorShortName>Other Coaches</OperatorShortName>
        </LicensedOperator>
    </Operators>
    <Services>
        <Service>
            <ServiceCode>S1</ServiceCode>
            <Lines>
                <Line id="L1">
                    <LineName>1</LineName>
                    <OutboundDescription>
                        <Description>Town to Village</Description>
                    </OutboundDescription>
                    <InboundDescription>
                        <Description>Village to Town</Description>
                    </InboundDescription>
                </Line>
            </Lines>
            <OperatingPeriod>
                <StartDate>2024-01-01</StartDate>
            </OperatingPeriod>
            <RegisteredOperatorRef>O1</RegisteredOperatorRef>
            <Mode>bus</Mode>
            <Description>Town - Village</Description>
            <StandardService>
                <Origin>Town</Origin>
                <Destination>Village</Destination>
                <JourneyPattern id="JP1">
                    <DestinationDisplay>Village</DestinationDisplay>
                    <Direction>outbound</Direction>
                    <RouteRef>R1</RouteRef>
                    <JourneyPatternSectionRefs>JPS1</JourneyPatternSectionRefs>
                    <JourneyPatternSectionRefs>JPS2</JourneyPatternSectionRefs>
                </JourneyPattern>
                <JourneyPattern id="JP2">
                    <DestinationDisplay>Village</DestinationDisplay>
                    <Direction>outbound</Direction>
                    <RouteRef>R1</RouteRef>
                    <JourneyPatternSectionRefs>JPS2</JourneyPatternSectionRefs>
                    <JourneyPatternSectionRefs>JPS1</JourneyPatternSectionRefs>
                </JourneyPattern>
                <JourneyPattern id="JP3">
                    <DestinationDisplay>Town</DestinationDisplay>
                    <Direction>inbound</Direction>
                    <RouteRef>R1</RouteRef>
                    <JourneyPatternSectionRefs>JPS3</JourneyPatternSectionRefs>
                </JourneyPattern>
            </StandardService>
        </Service>
    </Services>
    <VehicleJourneys>
        <VehicleJourney>
            <Operational>
                <TicketMachine>
                    <JourneyCode>1001</JourneyCode>
                </TicketMachine>
            </Operational>
            <VehicleJourneyCode>VJ1</VehicleJourneyCode>
            <ServiceRef>S1</ServiceRef>
            <LineRef>L1</LineRef>
            <JourneyPatternRef>JP1</JourneyPatternRef>
            <DepartureTime>07:00:00</DepartureTime>
        </VehicleJourney>
        <VehicleJourney>
            <VehicleJourneyCode>VJ2</VehicleJourneyCode>
            <ServiceRef>S1</ServiceRef>
            <LineRef>L1</LineRef>
            <JourneyPatternRef>JP1</JourneyPatternRef>
            <DepartureTime>08:00:00</DepartureTime>
        </VehicleJourney>
        <VehicleJourney>
            <VehicleJourneyCode>VJ3</VehicleJourneyCode>
            <ServiceRef>S1</ServiceRef>
            <LineRef>L1</LineRef>
            <JourneyPatternRef>JP3</JourneyPatternRef>
            <DepartureTime>09:00:00</DepartureTime>
        </VehicleJourney>
        <VehicleJourney>
            <VehicleJourneyCode>VJ4</VehicleJourneyCode>
            <ServiceRef>S1</ServiceRef>
            <LineRef>L1</LineRef>
            <VehicleJourneyRef>VJ3</VehicleJourneyRef>
            <DepartureTime>10:00:00</DepartureTime>
        </VehicleJourney>
        <VehicleJourney>
            <VehicleJourneyCode>VJ5</VehicleJourneyCode>
            <ServiceRef>S1</ServiceRef>
            <LineRef>L9</LineRef>
            <JourneyPatternRef>JP1</JourneyPatternRef>
            <DepartureTime>11:00:00</DepartureTime>
        </VehicleJourney>
    </VehicleJourneys>
</TransXChange>
"#;

/// Operator `ABCD`, service `S1` without an operating period and a line
/// without an `id`, whose journey pattern points at sections the document
/// does not contain.
pub const NO_USABLE_SECTIONS: &str = r#"
<TransXChange>
    <Operators>
        <Operator id="O1">
            <NationalOperatorCode>ABCD</NationalOperatorCode>
            <OperatorShortName>Test Buses</OperatorShortName>
        </Operator>
    </Operators>
    <Services>
        <Service>
            <ServiceCode>S1</ServiceCode>
            <Lines>
                <Line>
                    <LineName>1</LineName>
                </Line>
            </Lines>
            <RegisteredOperatorRef>O1</RegisteredOperatorRef>
            <Mode>bus</Mode>
            <StandardService>
                <Origin>Town</Origin>
                <Destination>Village</Destination>
                <JourneyPattern id="JP1">
                    <JourneyPatternSectionRefs>JPS1</JourneyPatternSectionRefs>
                </JourneyPattern>
            </StandardService>
        </Service>
    </Services>
</TransXChange>
"#;

pub const NO_NOC: &str = r#"
<TransXChange>
    <Operators>
        <Operator id="O1">
            <OperatorShortName>Mystery Buses</OperatorShortName>
        </Operator>
    </Operators>
    <Services>
        <Service>
            <ServiceCode>S1</ServiceCode>
            <Lines><Line id="L1"><LineName>1</LineName></Line></Lines>
            <RegisteredOperatorRef>O1</RegisteredOperatorRef>
        </Service>
    </Services>
</TransXChange>
"#;

/// Operator `ZZZZ` is unknown to the operators table and has two services;
/// operator `ABCD` after it is known.
pub const UNKNOWN_NOC_FIRST: &str = r#"
<TransXChange>
    <JourneyPatternSections>
        <JourneyPatternSection id="JPS1">
            <JourneyPatternTimingLink>
                <From><StopPointRef>010000001</StopPointRef></From>
                <To><StopPointRef>010000002</StopPointRef></To>
                <RunTime>PT1M</RunTime>
            </JourneyPatternTimingLink>
        </JourneyPatternSection>
    </JourneyPatternSections>
    <Operators>
        <Operator id="O1">
            <NationalOperatorCode>ZZZZ</NationalOperatorCode>
        </Operator>
        <Operator id="O2">
            <NationalOperatorCode>ABCD</NationalOperatorCode>
        </Operator>
    </Operators>
    <Services>
        <Service>
            <ServiceCode>Z1</ServiceCode>
            <Lines><Line id="ZL1"><LineName>Z1</LineName></Line></Lines>
            <RegisteredOperatorRef>O1</RegisteredOperatorRef>
            <Mode>bus</Mode>
            <StandardService>
                <JourneyPattern id="ZJP1">
                    <JourneyPatternSectionRefs>JPS1</JourneyPatternSectionRefs>
                </JourneyPattern>
            </StandardService>
        </Service>
        <Service>
            <ServiceCode>Z2</ServiceCode>
            <Lines><Line id="ZL2"><LineName>Z2</LineName></Line></Lines>
            <RegisteredOperatorRef>O1</RegisteredOperatorRef>
            <Mode>bus</Mode>
            <StandardService>
                <JourneyPattern id="ZJP2">
                    <JourneyPatternSectionRefs>JPS1</JourneyPatternSectionRefs>
                </JourneyPattern>
            </StandardService>
        </Service>
        <Service>
            <ServiceCode>S1</ServiceCode>
            <Lines><Line id="L1"><LineName>1</LineName></Line></Lines>
            <RegisteredOperatorRef>O2</RegisteredOperatorRef>
            <Mode>bus</Mode>
            <StandardService>
                <JourneyPattern id="JP1">
                    <JourneyPatternSectionRefs>JPS1</JourneyPatternSectionRefs>
                </JourneyPattern>
            </StandardService>
        </Service>
    </Services>
</TransXChange>
"#;

/// Operator `ABCD` with a usable service `S1` followed by a service `S2`
/// whose only section has no complete timing link.
pub const UNUSABLE_SECOND_SERVICE: &str = r#"
<TransXChange>
    <JourneyPatternSections>
        <JourneyPatternSection id="JPS1">
            <JourneyPatternTimingLink>
                <From><StopPointRef>010000001</StopPointRef></From>
                <To><StopPointRef>010000002</StopPointRef></To>
                <RunTime>PT1M</RunTime>
            </JourneyPatternTimingLink>
        </JourneyPatternSection>
        <JourneyPatternSection id="JPS2">
            <JourneyPatternTimingLink>
                <From><StopPointRef>010000002</StopPointRef></From>
                <RunTime>PT1M</RunTime>
            </JourneyPatternTimingLink>
        </JourneyPatternSection>
    </JourneyPatternSections>
    <Operators>
        <Operator id="O1">
            <NationalOperatorCode>ABCD</NationalOperatorCode>
        </Operator>
    </Operators>
    <Services>
        <Service>
            <ServiceCode>S1</ServiceCode>
            <Lines><Line id="L1"><LineName>1</LineName></Line></Lines>
            <RegisteredOperatorRef>O1</RegisteredOperatorRef>
            <Mode>bus</Mode>
            <StandardService>
                <JourneyPattern id="JP1">
                    <JourneyPatternSectionRefs>JPS1</JourneyPatternSectionRefs>
                </JourneyPattern>
            </StandardService>
        </Service>
        <Service>
            <ServiceCode>S2</ServiceCode>
            <Lines><Line id="L2"><LineName>2</LineName></Line></Lines>
            <RegisteredOperatorRef>O1</RegisteredOperatorRef>
            <Mode>bus</Mode>
            <StandardService>
                <JourneyPattern id="JP2">
                    <JourneyPatternSectionRefs>JPS2</JourneyPatternSectionRefs>
                </JourneyPattern>
            </StandardService>
        </Service>
    </Services>
</TransXChange>
"#;

/// Reference data matching the stops used in `EXTENDED`. The fourth stop is
/// not in it.
pub fn store_with_reference_data() -> MemoryStore {
    let mut store = MemoryStore::with_operators(&["ABCD", "WXYZ"]);
    store.add_stop("010000001", "E0001", "082", Some(TrackPoint::new("-1.0", "51.0")));
    store.add_stop("010000002", "E0002", "082", Some(TrackPoint::new("-1.05", "51.05")));
    store.add_stop("010000003", "E0003", "083", None);
    store
}
